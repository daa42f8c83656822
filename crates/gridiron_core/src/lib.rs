//! # gridiron_core - Deterministic American Football Game Simulation
//!
//! Two rosters in, a box score out. Plays are resolved from fixed
//! probability tables over player ratings; drives and halves are chained by
//! an explicit state machine with a simulated clock.
//!
//! ## Features
//! - Same seed and rosters = same game
//! - Per-player fatigue with automatic substitutions
//! - Run, pass, sack, turnover, penalty and special-teams models
//! - JSON roster input and box-score output
//!
//! ## Usage
//! ```rust
//! use gridiron_core::{models::LeagueRecord, simulate_game};
//!
//! # fn main() -> gridiron_core::Result<()> {
//! let json = r#"{"teams": []}"#;
//! let league = LeagueRecord::from_json_str(json)?;
//! assert!(simulate_game(&league, 42).is_err(), "a game needs two teams");
//! # Ok(())
//! # }
//! ```

// Resolvers take both rosters plus the drive state and rng
#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod engine;
pub mod error;
pub mod models;

#[cfg(test)]
mod test_fixtures;

pub use config::SimConfig;
pub use engine::{sim_drive, sim_play, simulate_game, GameSimulator};
pub use error::{Result, SimError};
pub use models::{BoxScore, LeagueRecord, Player, Position, RosterSource, Team};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
