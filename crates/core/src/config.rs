//! Application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the user config file,
//! `clicker.toml` in the working directory, then `CLICKER_*` environment
//! variables. Every source is optional.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::save::DEFAULT_SAVE_FILE;

/// Directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "clicker";
/// Per-directory override file.
pub const LOCAL_CONFIG_FILE: &str = "clicker.toml";

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Clicker configuration.
# Values here are overridden by ./clicker.toml and CLICKER_* environment variables.

# Save file location, relative to the working directory unless absolute.
# save_path = "savegame.json"

# Milliseconds between production ticks and screen redraws.
# tick_interval_ms = 100

# Directory for clicker.log.
# log_dir = "logs"
"#;

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where `s` writes and `l` reads.
    pub save_path: PathBuf,
    /// Tick period in milliseconds.
    pub tick_interval_ms: u64,
    /// Directory holding the log file.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            tick_interval_ms: 100,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load from the standard locations.
    pub fn load() -> Result<Self> {
        let mut files = Vec::new();
        if let Some(path) = user_config_path() {
            files.push(path);
        }
        files.push(PathBuf::from(LOCAL_CONFIG_FILE));
        Self::load_from(&files, Some("CLICKER"))
    }

    /// Load from explicit files (later wins) and an optional environment prefix.
    pub fn load_from(files: &[PathBuf], env_prefix: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        for path in files {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        if let Some(prefix) = env_prefix {
            builder = builder.add_source(Environment::with_prefix(prefix));
        }
        let settings: Self = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("failed to parse configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Tick period as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be greater than zero");
        }
        if self.save_path.as_os_str().is_empty() {
            bail!("save_path must not be empty");
        }
        Ok(())
    }
}

/// `<config_dir>/clicker/config.toml`, when the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Write a commented template to the user config path if nothing is there yet.
pub fn ensure_default_config() -> Result<()> {
    match user_config_path() {
        Some(path) => write_default_config(&path),
        None => Ok(()),
    }
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write {}", path.display()))
}
