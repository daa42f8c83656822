use crate::models::{Position, Side};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Incomplete roster for {team}: no {position} available")]
    IncompleteRoster { team: String, position: Position },

    #[error("No in-game players on the {side} of {team}")]
    NoStarters { team: String, side: Side },

    #[error("Roster source must provide two teams, found {found}")]
    MissingTeams { found: usize },

    #[error("Roster parse error: {0}")]
    Roster(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SimError {
    /// True when the failure comes from the roster input rather than config.
    pub fn is_roster_error(&self) -> bool {
        matches!(
            self,
            SimError::IncompleteRoster { .. }
                | SimError::NoStarters { .. }
                | SimError::MissingTeams { .. }
                | SimError::Roster(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
