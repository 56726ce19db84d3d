use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use scraper_core::{Effect, Msg};
use scraper_engine::{EngineEvent, EngineHandle};

use super::input::Command;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Command>) -> Self {
        let runner = Self {
            engine: Arc::new(engine),
        };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartScrape {
                    job_id,
                    industry,
                    location,
                } => {
                    engine_info!(
                        "StartScrape job_id={} industry={} location={}",
                        job_id,
                        industry,
                        location
                    );
                    self.engine.scrape(job_id, industry, location);
                }
                Effect::StartTicker { job_id, steps } => {
                    engine_debug!("StartTicker job_id={} steps={}", job_id, steps);
                    self.engine.start_ticker(job_id, steps);
                }
                Effect::StopTicker { job_id } => {
                    engine_debug!("StopTicker job_id={}", job_id);
                    self.engine.stop_ticker(job_id);
                }
                Effect::ExportCsv { rows } => {
                    engine_info!("ExportCsv rows={}", rows.len());
                    self.engine.export(rows);
                }
                Effect::Dispatch { seq, rows } => {
                    engine_info!("Dispatch seq={} rows={}", seq, rows.len());
                    self.engine.dispatch(seq, rows);
                }
                Effect::ScheduleNoticeExpiry { seq } => {
                    self.engine.schedule_notice_expiry(seq);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Command>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            forward_events(|timeout| engine.recv_timeout(timeout), &msg_tx);
        });
    }
}

const EVENT_POLL: Duration = Duration::from_millis(250);

/// Pump engine events into the message channel until either side goes away.
fn forward_events<R>(mut recv: R, msg_tx: &mpsc::Sender<Command>)
where
    R: FnMut(Duration) -> Result<EngineEvent, RecvTimeoutError>,
{
    loop {
        let event = match recv(EVENT_POLL) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                engine_warn!("Engine event channel closed");
                return;
            }
        };
        let Some(msg) = map_event(event) else {
            continue;
        };
        if msg_tx.send(Command::Msg(msg)).is_err() {
            return;
        }
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    let msg = match event {
        EngineEvent::ProgressTick { job_id } => Msg::ProgressTick { job_id },
        EngineEvent::ScrapeCompleted { job_id, result } => Msg::ScrapeCompleted {
            job_id,
            result: result.map_err(|err| err.message),
        },
        EngineEvent::ExportCompleted { result } => match result {
            Ok(Some(path)) => Msg::ExportCompleted { result: Ok(path) },
            Ok(None) => return None,
            Err(err) => {
                engine_warn!("Export failed: {}", err);
                Msg::ExportCompleted {
                    result: Err(err.to_string()),
                }
            }
        },
        EngineEvent::DispatchCompleted { seq, result } => Msg::DispatchCompleted {
            seq,
            result: result.map_err(|err| err.message),
        },
        EngineEvent::NoticeExpired { seq } => Msg::DispatchNoticeExpired { seq },
    };
    Some(msg)
}
