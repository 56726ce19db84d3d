use std::path::PathBuf;

use crate::pagination::{total_pages, PAGE_SIZE};
use crate::progress::{progress_message, INITIAL_PROGRESS_MESSAGE, PROGRESS_STEPS};
use crate::{DataRow, Effect};

pub type JobId = u64;
pub type DispatchSeq = u64;

/// A job that has been submitted and not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningJob {
    pub job_id: JobId,
    pub industry: String,
    pub location: String,
    pub progress_message: String,
    step: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Running(RunningJob),
    Succeeded,
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn status(&self) -> JobStatus {
        match self {
            JobState::Idle => JobStatus::Idle,
            JobState::Running(_) => JobStatus::Running,
            JobState::Succeeded => JobStatus::Succeeded,
            JobState::Failed { .. } => JobStatus::Failed,
        }
    }

    pub fn running(&self) -> Option<&RunningJob> {
        match self {
            JobState::Running(job) => Some(job),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DispatchState {
    #[default]
    Idle,
    Sending { seq: DispatchSeq },
    /// Success notice visible until the matching expiry arrives.
    Sent { seq: DispatchSeq },
    Failed { message: String },
}

/// Outcome of a scrape request as seen by the state machine.
pub type ScrapeOutcome = Result<Vec<DataRow>, String>;

/// Single owner of job lifecycle, result set, paging and dispatch state.
///
/// Every transition is one method; methods that leave `Running` return the
/// ticker teardown effect themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    job: JobState,
    last_job_id: JobId,
    rows: Vec<DataRow>,
    current_page: usize,
    dispatch: DispatchState,
    last_dispatch_seq: DispatchSeq,
    last_export: Option<PathBuf>,
    export_error: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            job: JobState::Idle,
            last_job_id: 0,
            rows: Vec::new(),
            current_page: 1,
            dispatch: DispatchState::Idle,
            last_dispatch_seq: 0,
            last_export: None,
            export_error: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job(&self) -> &JobState {
        &self.job
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.rows.len(), PAGE_SIZE)
    }

    pub fn dispatch(&self) -> &DispatchState {
        &self.dispatch
    }

    pub fn last_export(&self) -> Option<&PathBuf> {
        self.last_export.as_ref()
    }

    pub(crate) fn export_error(&self) -> Option<&str> {
        self.export_error.as_deref()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Start a new job, discarding the previous result set, error and notice.
    ///
    /// A job still running is superseded: its ticker is stopped and its
    /// eventual response will no longer match the current job id.
    pub(crate) fn begin_job(&mut self, industry: String, location: String) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(3);
        if let Some(previous) = self.job.running() {
            effects.push(Effect::StopTicker {
                job_id: previous.job_id,
            });
        }

        self.last_job_id += 1;
        let job_id = self.last_job_id;
        self.rows.clear();
        self.current_page = 1;
        self.export_error = None;
        if matches!(
            self.dispatch,
            DispatchState::Sent { .. } | DispatchState::Failed { .. }
        ) {
            self.dispatch = DispatchState::Idle;
        }
        self.job = JobState::Running(RunningJob {
            job_id,
            industry: industry.clone(),
            location: location.clone(),
            progress_message: INITIAL_PROGRESS_MESSAGE.to_string(),
            step: 0,
        });
        self.mark_dirty();

        effects.push(Effect::StartTicker {
            job_id,
            steps: PROGRESS_STEPS,
        });
        effects.push(Effect::StartScrape {
            job_id,
            industry,
            location,
        });
        effects
    }

    /// Advance the progress message. Ticks for other jobs, or past the end of
    /// the sequence, change nothing.
    pub(crate) fn advance_progress(&mut self, job_id: JobId) -> bool {
        let JobState::Running(job) = &mut self.job else {
            return false;
        };
        if job.job_id != job_id {
            return false;
        }
        let Some(message) = progress_message(&job.industry, job.step + 1) else {
            return false;
        };
        job.step += 1;
        job.progress_message = message;
        self.mark_dirty();
        true
    }

    /// Leave `Running` for `job_id`. Returns the ticker teardown effect, or
    /// `None` when `job_id` is not the running job and nothing changed.
    pub(crate) fn resolve_job(&mut self, job_id: JobId, outcome: ScrapeOutcome) -> Option<Effect> {
        match self.job.running() {
            Some(job) if job.job_id == job_id => {}
            _ => return None,
        }

        self.current_page = 1;
        match outcome {
            Ok(rows) => {
                self.rows = rows;
                self.job = JobState::Succeeded;
            }
            Err(message) => {
                self.rows = Vec::new();
                self.job = JobState::Failed { message };
            }
        }
        self.mark_dirty();
        Some(Effect::StopTicker { job_id })
    }

    /// Move to page `page`. Indices outside `[1, total_pages]` are ignored.
    pub(crate) fn set_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        self.mark_dirty();
        true
    }

    pub(crate) fn request_export(&self) -> Option<Effect> {
        if self.rows.is_empty() {
            return None;
        }
        Some(Effect::ExportCsv {
            rows: self.rows.clone(),
        })
    }

    pub(crate) fn record_export(&mut self, result: Result<PathBuf, String>) {
        match result {
            Ok(path) => {
                self.last_export = Some(path);
                self.export_error = None;
            }
            Err(message) => self.export_error = Some(message),
        }
        self.mark_dirty();
    }

    /// Start a dispatch of the full result set. No-op with zero rows or while
    /// another dispatch is in flight.
    pub(crate) fn begin_dispatch(&mut self) -> Option<Effect> {
        if self.rows.is_empty() || matches!(self.dispatch, DispatchState::Sending { .. }) {
            return None;
        }
        self.last_dispatch_seq += 1;
        let seq = self.last_dispatch_seq;
        self.dispatch = DispatchState::Sending { seq };
        self.export_error = None;
        self.mark_dirty();
        Some(Effect::Dispatch {
            seq,
            rows: self.rows.clone(),
        })
    }

    /// Record the dispatch outcome. Returns the notice expiry effect on success.
    pub(crate) fn resolve_dispatch(
        &mut self,
        seq: DispatchSeq,
        result: Result<(), String>,
    ) -> Option<Effect> {
        if self.dispatch != (DispatchState::Sending { seq }) {
            return None;
        }
        self.mark_dirty();
        match result {
            Ok(()) => {
                self.dispatch = DispatchState::Sent { seq };
                Some(Effect::ScheduleNoticeExpiry { seq })
            }
            Err(message) => {
                self.dispatch = DispatchState::Failed { message };
                None
            }
        }
    }

    pub(crate) fn expire_notice(&mut self, seq: DispatchSeq) -> bool {
        if self.dispatch != (DispatchState::Sent { seq }) {
            return false;
        }
        self.dispatch = DispatchState::Idle;
        self.mark_dirty();
        true
    }

    /// Error banner text: dispatch failure, then export failure, then job failure.
    pub(crate) fn error_banner(&self) -> Option<&str> {
        if let DispatchState::Failed { message } = &self.dispatch {
            return Some(message.as_str());
        }
        if let Some(message) = self.export_error() {
            return Some(message);
        }
        match &self.job {
            JobState::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }
}
