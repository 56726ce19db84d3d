use std::fmt;
use std::path::PathBuf;

use scraper_core::{DispatchSeq, JobId};

use crate::export::ExportError;

#[derive(Debug)]
pub enum EngineEvent {
    ProgressTick {
        job_id: JobId,
    },
    ScrapeCompleted {
        job_id: JobId,
        result: Result<serde_json::Value, RequestError>,
    },
    /// `Ok(None)` when there was nothing to export.
    ExportCompleted {
        result: Result<Option<PathBuf>, ExportError>,
    },
    DispatchCompleted {
        seq: DispatchSeq,
        result: Result<(), RequestError>,
    },
    NoticeExpired {
        seq: DispatchSeq,
    },
}

/// Failure of an outbound request. `message` is what the operator sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "undecodable response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
