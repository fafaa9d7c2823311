//! Gridiron Archive Module
//!
//! Historical pro football catalog with a game processing pipeline.
//! Catalog rows (seasons, leagues, conferences, divisions, teams) are
//! immutable reference data; games drive the team-season and league-season
//! aggregates through an apply/revert strategy executed inside a single
//! transaction per operation.

// Public exports
pub mod contract;
pub use contract::{
    ArchiveError, Conference, Division, Game, GameForm, League, LeagueSeason, Season, Team,
    TeamSeason,
};

pub mod domain;
pub use domain::{GamePrediction, Service, WeeklyUpdateService};

pub mod api;
pub mod infra;
