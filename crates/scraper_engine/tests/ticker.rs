use std::sync::{Arc, Mutex};
use std::time::Duration;

use scraper_engine::{EngineEvent, EventSink, ProgressTicker, TickerSlot};
use tokio::runtime::Handle;

const INTERVAL: Duration = Duration::from_secs(40);

#[derive(Clone, Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn ticks(&self) -> Vec<u64> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::ProgressTick { job_id } => Some(*job_id),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[tokio::test(start_paused = true)]
async fn ticker_stops_after_sequence_is_exhausted() {
    let sink = TestSink::default();
    let _ticker = ProgressTicker::spawn(&Handle::current(), 1, 3, INTERVAL, sink.clone());

    tokio::time::sleep(Duration::from_secs(1000)).await;

    assert_eq!(sink.ticks(), vec![1, 1, 1]);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_ticks() {
    let sink = TestSink::default();
    let ticker = ProgressTicker::spawn(&Handle::current(), 1, 7, INTERVAL, sink.clone());

    tokio::time::sleep(Duration::from_secs(50)).await;
    assert_eq!(sink.ticks(), vec![1]);

    drop(ticker);
    tokio::time::sleep(Duration::from_secs(400)).await;
    assert_eq!(sink.ticks(), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn slot_keeps_at_most_one_ticker() {
    let sink = TestSink::default();
    let mut slot = TickerSlot::new();

    slot.replace(ProgressTicker::spawn(&Handle::current(), 1, 7, INTERVAL, sink.clone()));
    tokio::time::sleep(Duration::from_secs(10)).await;
    slot.replace(ProgressTicker::spawn(&Handle::current(), 2, 7, INTERVAL, sink.clone()));
    assert_eq!(slot.active_job(), Some(2));

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(sink.ticks(), vec![2]);

    assert!(!slot.stop(1));
    assert!(slot.stop(2));
    assert_eq!(slot.active_job(), None);

    tokio::time::sleep(Duration::from_secs(400)).await;
    assert_eq!(sink.ticks(), vec![2]);
}
