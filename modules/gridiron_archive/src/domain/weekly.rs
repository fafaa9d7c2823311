//! Weekly update service
//!
//! Applies every game of one (season, week) slice in insertion order, then
//! refreshes the affected league-season aggregates, committing once at the
//! end. The only component that performs bulk aggregate updates; it assumes
//! the team-season rows for the target year already exist.

use crate::contract::ArchiveError;
use crate::domain::repository::GameStore;
use crate::domain::service::{affected_pairs, refresh_aggregates};
use crate::domain::strategy::ProcessGameStrategy;
use crate::domain::{guard, validation};
use std::sync::Arc;

/// Result of one weekly batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyUpdateSummary {
    pub season_year: i32,
    pub week: i32,
    pub games_processed: usize,
}

pub struct WeeklyUpdateService {
    store: Arc<dyn GameStore>,
}

impl WeeklyUpdateService {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }

    /// Process the whole week in one transaction
    ///
    /// A failure on any game rolls back the entire batch.
    pub async fn run(
        &self,
        season_year: Option<i32>,
        week: Option<i32>,
    ) -> Result<WeeklyUpdateSummary, ArchiveError> {
        let season_year = guard::require(season_year, "season_year")?;
        let week = guard::require(week, "week")?;
        validation::require_valid_year(season_year)?;
        validation::require_non_negative(week, "week")?;

        let mut tx = self.store.begin().await?;
        let games = tx.list_games_for_week(season_year, week).await?;

        for game in &games {
            ProcessGameStrategy::Apply.process(&mut *tx, game).await?;
        }

        let game_refs: Vec<&_> = games.iter().collect();
        refresh_aggregates(&mut *tx, &affected_pairs(&game_refs)).await?;
        tx.commit().await?;

        Ok(WeeklyUpdateSummary {
            season_year,
            week,
            games_processed: games.len(),
        })
    }
}
