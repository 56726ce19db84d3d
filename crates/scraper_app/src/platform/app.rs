use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use log::LevelFilter;
use scraper_core::{update, AppState};
use scraper_engine::EngineHandle;

use super::cli::Args;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::{parse_line, Command, HELP_TEXT};
use super::render::render;

pub fn run_app(args: Args) -> anyhow::Result<()> {
    let (mut config, source) = AppConfig::load(args.config.as_deref())?;
    config.apply_overrides(&args);
    engine_logging::initialize(
        config.log_destination.into(),
        LevelFilter::Info,
        &config.log_file,
    );
    match source {
        Some(path) => engine_info!("Loaded config from {:?}", path),
        None => engine_info!("No config file found, using defaults"),
    }
    engine_info!(
        "Starting with scrape_url={} dispatch_url={} output_dir={:?}",
        config.scrape_url,
        config.dispatch_url,
        config.output_dir
    );

    let engine = EngineHandle::new(config.engine_config()).context("starting engine")?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    let runner = EffectRunner::new(engine, cmd_tx.clone());
    spawn_stdin_reader(cmd_tx);

    let mut stdout = io::stdout();
    writeln!(stdout, "{HELP_TEXT}")?;

    let mut state = AppState::new();
    while let Ok(command) = cmd_rx.recv() {
        match command {
            Command::Msg(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.enqueue(effects);
                if state.consume_dirty() {
                    write!(stdout, "\n{}", render(&state.view()))?;
                }
            }
            Command::Show => write!(stdout, "\n{}", render(&state.view()))?,
            Command::Help => writeln!(stdout, "{HELP_TEXT}")?,
            Command::Invalid(reason) => writeln!(stdout, "{reason}")?,
            Command::Quit => break,
        }
        stdout.flush()?;
    }

    engine_info!("Shutting down");
    Ok(())
}

fn spawn_stdin_reader(cmd_tx: mpsc::Sender<Command>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    engine_warn!("Failed to read stdin: {}", err);
                    break;
                }
            };
            let Some(command) = parse_line(&line) else {
                continue;
            };
            if cmd_tx.send(command).is_err() {
                return;
            }
        }
        let _ = cmd_tx.send(Command::Quit);
    });
}
