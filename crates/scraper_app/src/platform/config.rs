//! Application configuration, loaded from an optional RON file and then
//! overridden by command line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use scraper_engine::{ClientSettings, EngineConfig};
use serde::{Deserialize, Serialize};

use super::cli::{Args, LogTarget};

const DEFAULT_CONFIG_FILENAME: &str = "scraper.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scrape_url: String,
    pub dispatch_url: String,
    pub progress_interval_secs: u64,
    pub notice_duration_secs: u64,
    pub dispatch_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub log_destination: LogTarget,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let clients = ClientSettings::default();
        Self {
            scrape_url: clients.scrape_url,
            dispatch_url: clients.dispatch_url,
            progress_interval_secs: 40,
            notice_duration_secs: 5,
            dispatch_timeout_secs: clients.dispatch_timeout.as_secs(),
            output_dir: PathBuf::from("output"),
            log_destination: LogTarget::Terminal,
            log_file: PathBuf::from("scraper.log"),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from `./scraper.ron` when no path is given.
    ///
    /// A missing default file yields defaults; an explicit path must exist.
    /// Also returns the path actually read, if any.
    pub fn load(path: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                return Ok((Self::default(), None));
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };

        let config = ron::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok((config, Some(path)))
    }

    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(url) = &args.scrape_url {
            self.scrape_url = url.clone();
        }
        if let Some(url) = &args.dispatch_url {
            self.dispatch_url = url.clone();
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(target) = args.log {
            self.log_destination = target;
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default_with_output(self.output_dir.clone());
        config.clients = ClientSettings {
            scrape_url: self.scrape_url.clone(),
            dispatch_url: self.dispatch_url.clone(),
            dispatch_timeout: Duration::from_secs(self.dispatch_timeout_secs),
            ..ClientSettings::default()
        };
        config.progress_interval = Duration::from_secs(self.progress_interval_secs);
        config.notice_duration = Duration::from_secs(self.notice_duration_secs);
        config.export_token = Arc::new(|| Utc::now().timestamp_millis().to_string());
        config
    }
}
