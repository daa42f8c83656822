//! Simulation engine
//!
//! Leaves first: sampling helpers, fatigue and substitution, play calling,
//! the play resolver, special teams, the drive state machine and the game
//! loop. Every function that draws randomness takes the generator as an
//! argument.

pub mod drive;
pub mod fatigue;
pub mod game;
pub mod play;
pub mod play_calling;
pub mod sampling;
pub mod special_teams;
pub mod substitution;

pub use drive::{sim_drive, DriveResult, DriveState, DriveSummary, PlayRecord};
pub use game::{simulate_game, DriveLog, GameSimulator, GameState, TeamSide};
pub use play::{line_advantage, sim_play, Penalty, PlayOutcome, PlayResult};
pub use play_calling::{DefenseCall, FourthDownDecision, LastPlay, PlayCall};
pub use substitution::Substitution;
