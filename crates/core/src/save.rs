//! Save-game persistence.
//!
//! A save is a single pretty-printed JSON document at a fixed path. Writing
//! replaces the file wholesale; loading either yields a complete state or
//! nothing at all.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::{SaveError, SaveResult},
    models::Catalog,
    state::{BuildingState, GameState},
};

/// File name used when no other location is configured.
pub const DEFAULT_SAVE_FILE: &str = "savegame.json";

/// Metadata describing a completed save.
#[derive(Debug, Clone)]
pub struct SaveEntry {
    /// Location written.
    pub path: PathBuf,
    /// Timestamp stamped into the state.
    pub saved_at: DateTime<Utc>,
}

/// Outcome of a load attempt that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No save file exists yet.
    NotFound,
    /// A complete state ready to replace the current one.
    Loaded(GameState),
}

/// Serialized upgrade, with its catalog definition alongside the purchase flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpgradeRecord {
    name: String,
    purchased: bool,
    cost: f64,
    production_multiplier: f64,
    description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildingRecord {
    name: String,
    count: u32,
    base_cost: f64,
    base_production: f64,
    upgrades: Vec<UpgradeRecord>,
}

/// On-disk shape of a save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavePayload {
    points: f64,
    total_points_earned: f64,
    click_power: f64,
    buildings: Vec<BuildingRecord>,
    last_saved: DateTime<Utc>,
}

impl SavePayload {
    fn capture(state: &GameState, catalog: &Catalog) -> Self {
        let buildings = catalog
            .buildings()
            .iter()
            .zip(&state.buildings)
            .map(|(spec, building)| BuildingRecord {
                name: spec.name.clone(),
                count: building.count,
                base_cost: spec.base_cost,
                base_production: spec.base_production,
                upgrades: spec
                    .upgrades
                    .iter()
                    .zip(&building.upgrades_purchased)
                    .map(|(upgrade, purchased)| UpgradeRecord {
                        name: upgrade.name.clone(),
                        purchased: *purchased,
                        cost: upgrade.cost,
                        production_multiplier: upgrade.production_multiplier,
                        description: upgrade.description.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            points: state.points,
            total_points_earned: state.total_points_earned,
            click_power: state.click_power,
            buildings,
            last_saved: state.last_saved,
        }
    }

    /// Rebuild runtime state, rejecting snapshots shaped for a different catalog.
    fn into_state(self, catalog: &Catalog) -> Result<GameState, String> {
        for (label, value) in [
            ("points", self.points),
            ("totalPointsEarned", self.total_points_earned),
            ("clickPower", self.click_power),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{label} must be a non-negative number, found {value}"));
            }
        }
        if self.buildings.len() != catalog.len() {
            return Err(format!(
                "expected {} buildings, found {}",
                catalog.len(),
                self.buildings.len()
            ));
        }

        let mut buildings = Vec::with_capacity(self.buildings.len());
        for (record, spec) in self.buildings.into_iter().zip(catalog.buildings()) {
            if record.name != spec.name {
                return Err(format!(
                    "expected building {:?}, found {:?}",
                    spec.name, record.name
                ));
            }
            if record.upgrades.len() != spec.upgrades.len() {
                return Err(format!(
                    "{} expects {} upgrades, found {}",
                    spec.name,
                    spec.upgrades.len(),
                    record.upgrades.len()
                ));
            }
            let mut upgrades_purchased = Vec::with_capacity(record.upgrades.len());
            for (upgrade, upgrade_spec) in record.upgrades.iter().zip(&spec.upgrades) {
                if upgrade.name != upgrade_spec.name {
                    return Err(format!(
                        "expected upgrade {:?}, found {:?}",
                        upgrade_spec.name, upgrade.name
                    ));
                }
                upgrades_purchased.push(upgrade.purchased);
            }
            buildings.push(BuildingState {
                count: record.count,
                upgrades_purchased,
            });
        }

        Ok(GameState {
            points: self.points,
            total_points_earned: self.total_points_earned,
            click_power: self.click_power,
            buildings,
            last_saved: self.last_saved,
        })
    }
}

/// Reads and writes the save file.
#[derive(Debug, Clone)]
pub struct SaveManager {
    path: PathBuf,
}

impl SaveManager {
    /// Manage the save file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Save file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp `last_saved` and overwrite the save file with the full state.
    pub fn save(&self, state: &mut GameState, catalog: &Catalog) -> Result<SaveEntry> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        state.last_saved = Utc::now();
        let payload = SavePayload::capture(state, catalog);
        let serialised =
            serde_json::to_string_pretty(&payload).context("failed to serialize game state")?;
        fs::write(&self.path, serialised)
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        info!(path = %self.path.display(), points = state.points, "Game saved");
        Ok(SaveEntry {
            path: self.path.clone(),
            saved_at: state.last_saved,
        })
    }

    /// Read the save file. Nothing is applied here; callers replace their state
    /// only on [`LoadOutcome::Loaded`].
    pub fn load(&self, catalog: &Catalog) -> SaveResult<LoadOutcome> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No save found");
                return Ok(LoadOutcome::NotFound);
            }
            Err(source) => {
                return Err(SaveError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let payload: SavePayload =
            serde_json::from_str(&content).map_err(|source| SaveError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let state = payload.into_state(catalog).map_err(|reason| {
            warn!(path = %self.path.display(), %reason, "Save rejected");
            SaveError::Schema {
                path: self.path.clone(),
                reason,
            }
        })?;

        info!(path = %self.path.display(), points = state.points, "Game loaded");
        Ok(LoadOutcome::Loaded(state))
    }
}
