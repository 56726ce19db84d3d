use std::time::Duration;

use engine_logging::engine_debug;
use scraper_core::JobId;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

/// Receives ticks and other engine events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Handle to a running progress ticker. Dropping it stops the ticker.
#[derive(Debug)]
pub struct ProgressTicker {
    job_id: JobId,
    cancel: CancellationToken,
}

impl ProgressTicker {
    /// Emit `ProgressTick` every `interval`, `steps` times at most.
    pub fn spawn<S>(
        runtime: &Handle,
        job_id: JobId,
        steps: usize,
        interval: Duration,
        sink: S,
    ) -> Self
    where
        S: EventSink + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        runtime.spawn(async move {
            for step in 1..=steps {
                tokio::select! {
                    _ = token.cancelled() => {
                        engine_debug!("Ticker for job {} cancelled at step {}", job_id, step);
                        return;
                    }
                    _ = tokio::time::sleep(interval) => {
                        sink.emit(EngineEvent::ProgressTick { job_id });
                    }
                }
            }
            engine_debug!("Ticker for job {} exhausted", job_id);
        });
        Self { job_id, cancel }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Holds at most one ticker.
#[derive(Debug, Default)]
pub struct TickerSlot {
    current: Option<ProgressTicker>,
}

impl TickerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `ticker`, stopping whatever ticker was there before.
    pub fn replace(&mut self, ticker: ProgressTicker) {
        if let Some(previous) = self.current.replace(ticker) {
            previous.cancel();
        }
    }

    /// Stop the ticker if it belongs to `job_id`.
    pub fn stop(&mut self, job_id: JobId) -> bool {
        match &self.current {
            Some(ticker) if ticker.job_id() == job_id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn active_job(&self) -> Option<JobId> {
        self.current.as_ref().map(ProgressTicker::job_id)
    }
}
