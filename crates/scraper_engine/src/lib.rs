//! Scraper engine: outbound requests, timers and CSV export.
mod client;
mod engine;
mod export;
mod persist;
mod ticker;
mod types;

pub use client::{
    ClientSettings, DispatchClient, ReqwestDispatchClient, ReqwestScrapeClient, ScrapeClient,
    DISPATCH_STATUS_MESSAGE, SCRAPE_STATUS_MESSAGE,
};
pub use engine::{EngineConfig, EngineHandle, ExportTokenFn};
pub use export::{export_csv, render_csv, ExportError, CSV_FILE_PREFIX, CSV_HEADER};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use ticker::{ChannelEventSink, EventSink, ProgressTicker, TickerSlot};
pub use types::{EngineEvent, FailureKind, RequestError};
