pub mod box_score;
pub mod player;
pub mod roster;
pub mod stats;
pub mod team;

pub use box_score::{BoxScore, TeamBox};
pub use player::{rating, Attributes, Player, Position, Side, NEUTRAL_SKILL};
pub use roster::{LeagueRecord, PlayerRecord, RosterSource, TeamRecord};
pub use stats::{PlayerStats, StatKey};
pub use team::Team;
