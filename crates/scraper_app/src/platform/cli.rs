use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Trigger scrape jobs, page through the results, export CSV and forward them
/// to the notification pipeline.
#[derive(Debug, Parser)]
#[command(name = "lead-scraper", version, about)]
pub struct Args {
    /// Config file (RON). Defaults to ./scraper.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scrape trigger endpoint.
    #[arg(long)]
    pub scrape_url: Option<String>,

    /// Dispatch/notification endpoint.
    #[arg(long)]
    pub dispatch_url: Option<String>,

    /// Directory CSV exports are written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    File,
    #[default]
    Terminal,
    Both,
}

impl From<LogTarget> for engine_logging::LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => engine_logging::LogDestination::File,
            LogTarget::Terminal => engine_logging::LogDestination::Terminal,
            LogTarget::Both => engine_logging::LogDestination::Both,
        }
    }
}
