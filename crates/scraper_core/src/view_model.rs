use std::path::PathBuf;

use crate::pagination::{page, page_bounds, PAGE_SIZE};
use crate::{AppState, DataRow, DispatchState, JobState, JobStatus};

/// Snapshot of everything the front end renders. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub status: JobStatus,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub progress_message: Option<String>,
    pub error_banner: Option<String>,
    pub dispatch_in_flight: bool,
    pub dispatch_notice: bool,
    pub total_rows: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_rows: Vec<DataRow>,
    /// 1-based inclusive row range of the current page.
    pub showing: Option<(usize, usize)>,
    pub has_prev: bool,
    pub has_next: bool,
    pub last_export: Option<PathBuf>,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let running = self.job().running();
        let total_rows = self.rows().len();
        let current_page = self.current_page();
        let total_pages = self.total_pages();

        AppViewModel {
            status: self.job().status(),
            industry: running.map(|job| job.industry.clone()),
            location: running.map(|job| job.location.clone()),
            progress_message: match self.job() {
                JobState::Running(job) => Some(job.progress_message.clone()),
                _ => None,
            },
            error_banner: self.error_banner().map(ToOwned::to_owned),
            dispatch_in_flight: matches!(self.dispatch(), DispatchState::Sending { .. }),
            dispatch_notice: matches!(self.dispatch(), DispatchState::Sent { .. }),
            total_rows,
            current_page,
            total_pages,
            page_rows: page(self.rows(), PAGE_SIZE, current_page).to_vec(),
            showing: page_bounds(total_rows, PAGE_SIZE, current_page),
            has_prev: current_page > 1 && total_pages > 0,
            has_next: current_page < total_pages,
            last_export: self.last_export().cloned(),
        }
    }
}
