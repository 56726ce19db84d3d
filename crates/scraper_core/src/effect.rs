use crate::{DataRow, DispatchSeq, JobId};

/// Side effects requested by `update`, executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartScrape {
        job_id: JobId,
        industry: String,
        location: String,
    },
    /// Start the cosmetic ticker; it stops by itself after `steps` ticks.
    StartTicker { job_id: JobId, steps: usize },
    StopTicker { job_id: JobId },
    ExportCsv { rows: Vec<DataRow> },
    Dispatch { seq: DispatchSeq, rows: Vec<DataRow> },
    /// Clear the dispatch success notice after the configured duration.
    ScheduleNoticeExpiry { seq: DispatchSeq },
}
