//! Scraper core: pure job state machine, row normalization and view-model helpers.
mod effect;
mod msg;
mod pagination;
mod progress;
mod row;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use pagination::{page, page_bounds, total_pages, PAGE_SIZE};
pub use progress::{progress_message, INITIAL_PROGRESS_MESSAGE, PROGRESS_STEPS};
pub use row::{normalize_record, normalize_response, DataRow, WEBSITE_FALLBACK};
pub use state::{
    AppState, DispatchSeq, DispatchState, JobId, JobState, JobStatus, RunningJob, ScrapeOutcome,
};
pub use update::update;
pub use view_model::AppViewModel;
