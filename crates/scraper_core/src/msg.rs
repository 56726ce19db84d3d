use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Operator submitted the industry/location form.
    ScrapeSubmitted { industry: String, location: String },
    /// Progress ticker fired for a job.
    ProgressTick { job_id: crate::JobId },
    /// Scrape endpoint answered (or the request failed) for a job.
    ScrapeCompleted {
        job_id: crate::JobId,
        result: Result<serde_json::Value, String>,
    },
    PageNext,
    PagePrev,
    PageSelected(usize),
    /// Operator asked for a CSV of the full result set.
    ExportRequested,
    ExportCompleted { result: Result<PathBuf, String> },
    /// Operator asked to forward the result set to the dispatch endpoint.
    DispatchRequested,
    DispatchCompleted {
        seq: crate::DispatchSeq,
        result: Result<(), String>,
    },
    DispatchNoticeExpired { seq: crate::DispatchSeq },
}
