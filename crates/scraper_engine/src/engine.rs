use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use engine_logging::{engine_error, engine_info, engine_warn};
use scraper_core::{DataRow, DispatchSeq, JobId};

use crate::client::{
    ClientSettings, DispatchClient, ReqwestDispatchClient, ReqwestScrapeClient, ScrapeClient,
};
use crate::export::export_csv;
use crate::ticker::{ChannelEventSink, EventSink, ProgressTicker, TickerSlot};
use crate::{EngineEvent, RequestError};

/// Produces the unique token embedded in export filenames.
pub type ExportTokenFn = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub clients: ClientSettings,
    pub output_dir: PathBuf,
    pub progress_interval: Duration,
    pub notice_duration: Duration,
    pub export_token: ExportTokenFn,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            clients: ClientSettings::default(),
            output_dir,
            progress_interval: Duration::from_secs(40),
            notice_duration: Duration::from_secs(5),
            export_token: Arc::new(unix_millis_token),
        }
    }
}

fn unix_millis_token() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}

enum EngineCommand {
    Scrape {
        job_id: JobId,
        industry: String,
        location: String,
    },
    StartTicker {
        job_id: JobId,
        steps: usize,
    },
    StopTicker {
        job_id: JobId,
    },
    Export {
        rows: Vec<DataRow>,
    },
    Dispatch {
        seq: DispatchSeq,
        rows: Vec<DataRow>,
    },
    ScheduleNoticeExpiry {
        seq: DispatchSeq,
    },
}

struct Clients {
    scrape: Arc<dyn ScrapeClient>,
    dispatch: Arc<dyn DispatchClient>,
}

/// Runs requests, timers and exports on a background tokio runtime and
/// reports results as `EngineEvent`s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, RequestError> {
        let scrape = Arc::new(ReqwestScrapeClient::new(&config.clients)?);
        let dispatch = Arc::new(ReqwestDispatchClient::new(&config.clients)?);
        Ok(Self::with_clients(config, scrape, dispatch))
    }

    pub fn with_clients(
        config: EngineConfig,
        scrape: Arc<dyn ScrapeClient>,
        dispatch: Arc<dyn DispatchClient>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let clients = Clients { scrape, dispatch };

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut ticker = TickerSlot::new();
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &config, &clients, &mut ticker, command, &event_tx);
            }
            engine_info!("Engine command channel closed; shutting down");
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn scrape(&self, job_id: JobId, industry: impl Into<String>, location: impl Into<String>) {
        self.send(EngineCommand::Scrape {
            job_id,
            industry: industry.into(),
            location: location.into(),
        });
    }

    pub fn start_ticker(&self, job_id: JobId, steps: usize) {
        self.send(EngineCommand::StartTicker { job_id, steps });
    }

    pub fn stop_ticker(&self, job_id: JobId) {
        self.send(EngineCommand::StopTicker { job_id });
    }

    pub fn export(&self, rows: Vec<DataRow>) {
        self.send(EngineCommand::Export { rows });
    }

    pub fn dispatch(&self, seq: DispatchSeq, rows: Vec<DataRow>) {
        self.send(EngineCommand::Dispatch { seq, rows });
    }

    pub fn schedule_notice_expiry(&self, seq: DispatchSeq) {
        self.send(EngineCommand::ScheduleNoticeExpiry { seq });
    }

    /// Wait up to `timeout` for the next event. `Disconnected` means the
    /// engine thread is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        rx.recv_timeout(timeout)
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Engine is not running; command dropped");
        }
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    config: &EngineConfig,
    clients: &Clients,
    ticker: &mut TickerSlot,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let sink = ChannelEventSink::new(event_tx.clone());
    match command {
        EngineCommand::Scrape {
            job_id,
            industry,
            location,
        } => {
            let client = clients.scrape.clone();
            runtime.spawn(async move {
                let result = client.scrape(&industry, &location).await;
                if let Err(err) = &result {
                    engine_warn!("Scrape job {} failed: {} ({})", job_id, err, err.kind);
                } else {
                    engine_info!("Scrape job {} completed", job_id);
                }
                sink.emit(EngineEvent::ScrapeCompleted { job_id, result });
            });
        }
        EngineCommand::StartTicker { job_id, steps } => {
            ticker.replace(ProgressTicker::spawn(
                runtime.handle(),
                job_id,
                steps,
                config.progress_interval,
                sink,
            ));
        }
        EngineCommand::StopTicker { job_id } => {
            ticker.stop(job_id);
        }
        EngineCommand::Export { rows } => {
            let output_dir = config.output_dir.clone();
            let token = (config.export_token)();
            runtime.spawn_blocking(move || {
                let result = export_csv(&output_dir, &rows, &token);
                if let Err(err) = &result {
                    engine_error!("CSV export to {:?} failed: {}", output_dir, err);
                }
                sink.emit(EngineEvent::ExportCompleted { result });
            });
        }
        EngineCommand::Dispatch { seq, rows } => {
            let client = clients.dispatch.clone();
            runtime.spawn(async move {
                let result = client.dispatch(&rows).await;
                if let Err(err) = &result {
                    engine_warn!("Dispatch {} failed: {} ({})", seq, err, err.kind);
                }
                sink.emit(EngineEvent::DispatchCompleted { seq, result });
            });
        }
        EngineCommand::ScheduleNoticeExpiry { seq } => {
            let after = config.notice_duration;
            runtime.spawn(async move {
                tokio::time::sleep(after).await;
                sink.emit(EngineEvent::NoticeExpired { seq });
            });
        }
    }
}
