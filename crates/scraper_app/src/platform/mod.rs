mod app;
pub mod cli;
mod config;
mod effects;
mod input;
mod render;

pub use app::run_app;
