#![warn(clippy::all, missing_docs)]

//! Core domain logic for the terminal clicker.
//!
//! This crate hosts the building catalog, player state, economy formulas,
//! command parsing, tick timing, configuration handling, and persistence
//! used by the terminal frontend.

pub mod clock;
pub mod command;
pub mod config;
pub mod economy;
pub mod error;
pub mod format;
pub mod game;
pub mod models;
pub mod save;
pub mod state;

pub use clock::TickClock;
pub use command::Command;
pub use config::AppConfig;
pub use error::SaveError;
pub use format::format_amount;
pub use game::{Game, Purchase};
pub use models::{BuildingSpec, Catalog, UpgradeSpec};
pub use save::{LoadOutcome, SaveEntry, SaveManager};
pub use state::{BuildingState, GameState};
