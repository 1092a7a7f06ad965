mod app;
mod render;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};

use clicker_core::{
    config::{self, AppConfig},
    Catalog, Game, SaveManager,
};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.log_dir)?;
    if let Err(err) = config::ensure_default_config() {
        warn!(error = %format!("{err:#}"), "Could not write default config");
    }
    info!(
        save_path = %config.save_path.display(),
        tick_ms = config.tick_interval_ms,
        "Starting clicker"
    );

    let game = Game::new(Catalog::default());
    let saves = SaveManager::new(config.save_path.clone());
    let mut app = app::ClickerApp::new(game, saves, config.tick_interval());
    app.run(BufReader::new(tokio::io::stdin()), io::stdout()).await
}

fn init_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("clicker.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout is the game screen, so logs only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
