mod app;
mod client;
mod config;
mod dashboard;
mod error;
mod health;
mod reconcile;
mod session;
mod ui;
mod upload;

use std::path::Path;

use crate::{config::AppConfig, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// Logs go to a file: the terminal itself belongs to the UI, and
/// user-facing errors are shown there as short localized strings.
fn init_tracing(config: &AppConfig) -> Result<()> {
    if config.log_file.is_empty() {
        return Ok(());
    }
    if let Some(parent) = Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("seyfo_tui={}", config.log_level))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
