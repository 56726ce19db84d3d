use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use scraper_core::{normalize_record, DataRow};
use scraper_engine::{
    DispatchClient, EngineConfig, EngineEvent, EngineHandle, RequestError, ScrapeClient,
};
use serde_json::json;
use tempfile::TempDir;

const WAIT: Duration = Duration::from_secs(5);

struct FixedScrape;

#[async_trait::async_trait]
impl ScrapeClient for FixedScrape {
    async fn scrape(
        &self,
        industry: &str,
        location: &str,
    ) -> Result<serde_json::Value, RequestError> {
        Ok(json!({ "data": [{ "SchoolName": format!("{industry} in {location}") }] }))
    }
}

#[derive(Default)]
struct CountingDispatch {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl DispatchClient for CountingDispatch {
    async fn dispatch(&self, _rows: &[DataRow]) -> Result<(), RequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn test_config(dir: &TempDir) -> EngineConfig {
    let mut config = EngineConfig::default_with_output(dir.path().to_path_buf());
    config.progress_interval = Duration::from_millis(10);
    config.notice_duration = Duration::from_millis(10);
    config.export_token = Arc::new(|| "fixed".to_string());
    config
}

#[test]
fn scrape_result_comes_back_as_event() {
    let dir = TempDir::new().unwrap();
    let engine = EngineHandle::with_clients(
        test_config(&dir),
        Arc::new(FixedScrape),
        Arc::new(CountingDispatch::default()),
    );

    engine.scrape(3, "Schools", "Pune");

    match engine.recv_timeout(WAIT) {
        Ok(EngineEvent::ScrapeCompleted { job_id, result }) => {
            assert_eq!(job_id, 3);
            assert_eq!(result.unwrap()["data"][0]["SchoolName"], "Schools in Pune");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn ticker_runs_its_steps_then_goes_quiet() {
    let dir = TempDir::new().unwrap();
    let engine = EngineHandle::with_clients(
        test_config(&dir),
        Arc::new(FixedScrape),
        Arc::new(CountingDispatch::default()),
    );

    engine.start_ticker(1, 2);
    for _ in 0..2 {
        match engine.recv_timeout(WAIT) {
            Ok(EngineEvent::ProgressTick { job_id }) => assert_eq!(job_id, 1),
            other => panic!("unexpected event: {other:?}"),
        }
    }
    assert_eq!(
        engine.recv_timeout(Duration::from_millis(100)).err(),
        Some(RecvTimeoutError::Timeout)
    );
}

#[test]
fn stopped_ticker_emits_nothing() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.progress_interval = Duration::from_millis(200);
    let engine = EngineHandle::with_clients(
        config,
        Arc::new(FixedScrape),
        Arc::new(CountingDispatch::default()),
    );

    engine.start_ticker(1, 5);
    engine.stop_ticker(1);
    assert_eq!(
        engine.recv_timeout(Duration::from_millis(500)).err(),
        Some(RecvTimeoutError::Timeout)
    );
}

#[test]
fn dispatch_then_notice_expiry() {
    let dir = TempDir::new().unwrap();
    let dispatch = Arc::new(CountingDispatch::default());
    let engine = EngineHandle::with_clients(
        test_config(&dir),
        Arc::new(FixedScrape),
        dispatch.clone(),
    );

    engine.dispatch(1, vec![normalize_record(&json!({ "SchoolName": "Oak" }))]);
    match engine.recv_timeout(WAIT) {
        Ok(EngineEvent::DispatchCompleted { seq, result }) => {
            assert_eq!(seq, 1);
            assert!(result.is_ok());
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(dispatch.calls.load(Ordering::SeqCst), 1);

    engine.schedule_notice_expiry(1);
    match engine.recv_timeout(WAIT) {
        Ok(EngineEvent::NoticeExpired { seq }) => assert_eq!(seq, 1),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn export_writes_into_output_dir() {
    let dir = TempDir::new().unwrap();
    let engine = EngineHandle::with_clients(
        test_config(&dir),
        Arc::new(FixedScrape),
        Arc::new(CountingDispatch::default()),
    );

    engine.export(vec![normalize_record(&json!({ "SchoolName": "Oak" }))]);
    match engine.recv_timeout(WAIT) {
        Ok(EngineEvent::ExportCompleted { result }) => {
            let path = result.unwrap().expect("file written");
            assert_eq!(path, dir.path().join("scraped_data_fixed.csv"));
            assert!(path.exists());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
