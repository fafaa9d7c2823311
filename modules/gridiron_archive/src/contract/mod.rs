//! Contract layer - transport-agnostic models and errors
//!
//! NO serde derives on models - these are pure domain types. The REST layer
//! has its own DTOs and mappers.

pub mod error;
pub mod model;

pub use error::ArchiveError;
pub use model::{
    Conference, Division, Game, GameForm, League, LeagueSeason, LeagueSeasonTotals, Season, Team,
    TeamSeason,
};
pub use model::{
    DefensiveRankingsTeamSeason, OffensiveRankingsTeamSeason, StandingsTeamSeason,
    TeamSeasonScheduleProfileRecord, TotalRankingsTeamSeason,
};
