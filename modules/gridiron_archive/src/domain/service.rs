//! Domain service - catalog management and the game processing pipeline
//!
//! Every public game operation validates its inputs before any mutation,
//! then delineates exactly one transaction. Aggregate rows are touched only
//! through the process-game strategy and the totals refresh below.

use crate::contract::{
    ArchiveError, Conference, Division, Game, GameForm, League, LeagueSeason, Season, Team,
    TeamSeason,
};
use crate::contract::{
    DefensiveRankingsTeamSeason, OffensiveRankingsTeamSeason, StandingsTeamSeason,
    TeamSeasonScheduleProfileRecord, TotalRankingsTeamSeason,
};
use crate::domain::predictor::{self, GamePrediction};
use crate::domain::repository::{CatalogRepository, GameStore, GameStoreTx, ReportingRepository};
use crate::domain::strategy::ProcessGameStrategy;
use crate::domain::{guard, validation};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Domain service over the catalog, the pipeline and the reporting port
pub struct Service {
    catalog: Arc<dyn CatalogRepository>,
    games: Arc<dyn GameStore>,
    reporting: Arc<dyn ReportingRepository>,
}

impl Service {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        games: Arc<dyn GameStore>,
        reporting: Arc<dyn ReportingRepository>,
    ) -> Self {
        Self {
            catalog,
            games,
            reporting,
        }
    }

    // ===== Game operations =====

    /// Create a game and propagate its effect into the aggregates
    pub async fn create_game(&self, form: GameForm) -> Result<Game, ArchiveError> {
        let mut game = build_game(0, form)?;
        self.check_game_references(&game).await?;
        game.decide_winner_and_loser();

        let mut tx = self.games.begin().await?;
        let game = tx.insert_game(&game).await?;
        ProcessGameStrategy::Apply.process(&mut *tx, &game).await?;
        refresh_aggregates(&mut *tx, &affected_pairs(&[&game])).await?;
        tx.commit().await?;

        Ok(game)
    }

    /// Edit a game: revert the old effect, apply the new one
    ///
    /// Both phases run on the same transaction; a failure anywhere leaves no
    /// aggregate mutation observable.
    pub async fn update_game(&self, id: i64, form: GameForm) -> Result<Game, ArchiveError> {
        let mut updated = build_game(id, form)?;
        self.check_game_references(&updated).await?;
        updated.decide_winner_and_loser();

        let mut tx = self.games.begin().await?;
        let old = tx
            .get_game(id)
            .await?
            .ok_or_else(|| ArchiveError::not_found("game", id.to_string()))?;

        ProcessGameStrategy::Revert.process(&mut *tx, &old).await?;
        let updated = tx.update_game(&updated).await?;
        ProcessGameStrategy::Apply.process(&mut *tx, &updated).await?;
        refresh_aggregates(&mut *tx, &affected_pairs(&[&old, &updated])).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Delete a game and subtract its effect from the aggregates
    pub async fn delete_game(&self, id: i64) -> Result<(), ArchiveError> {
        let mut tx = self.games.begin().await?;
        let game = tx
            .get_game(id)
            .await?
            .ok_or_else(|| ArchiveError::not_found("game", id.to_string()))?;

        ProcessGameStrategy::Revert.process(&mut *tx, &game).await?;
        // the row must be gone before totals are re-derived from the games
        // visible in this transaction
        tx.delete_game(id).await?;
        refresh_aggregates(&mut *tx, &affected_pairs(&[&game])).await?;
        tx.commit().await?;

        Ok(())
    }

    pub async fn get_game(&self, id: i64) -> Result<Game, ArchiveError> {
        self.games
            .get_game(id)
            .await?
            .ok_or_else(|| ArchiveError::not_found("game", id.to_string()))
    }

    pub async fn list_games(
        &self,
        season_year: Option<i32>,
        week: Option<i32>,
    ) -> Result<Vec<Game>, ArchiveError> {
        self.games.list_games(season_year, week).await
    }

    // ===== Predictor =====

    /// Estimate the score of an unplayed matchup in a given season
    pub async fn predict_game(
        &self,
        guest_name: Option<String>,
        host_name: Option<String>,
        season_year: Option<i32>,
    ) -> Result<GamePrediction, ArchiveError> {
        let guest_name = guard::require(guest_name, "guest")?;
        let host_name = guard::require(host_name, "host")?;
        let season_year = guard::require(season_year, "year")?;

        let guest = self.games.get_team_season(&guest_name, season_year).await?;
        let host = self.games.get_team_season(&host_name, season_year).await?;
        Ok(predictor::predict(guest.as_ref(), host.as_ref()))
    }

    // ===== Catalog operations =====

    pub async fn create_season(&self, season: Season) -> Result<Season, ArchiveError> {
        validation::require_valid_year(season.year)?;
        validation::require_non_negative(season.num_of_weeks_scheduled, "num_of_weeks_scheduled")?;
        validation::require_non_negative(season.num_of_weeks_completed, "num_of_weeks_completed")?;
        self.catalog.insert_season(&season).await
    }

    pub async fn get_season(&self, year: i32) -> Result<Season, ArchiveError> {
        self.catalog
            .get_season(year)
            .await?
            .ok_or_else(|| ArchiveError::not_found("season", year.to_string()))
    }

    pub async fn list_seasons(&self) -> Result<Vec<Season>, ArchiveError> {
        self.catalog.list_seasons().await
    }

    pub async fn create_league(&self, league: League) -> Result<League, ArchiveError> {
        validation::require_short_name(&league.short_name, "short_name")?;
        validation::require_long_name(&league.long_name, "long_name")?;
        validate_season_span(league.first_season_year, league.last_season_year)?;
        self.require_season_exists(league.first_season_year).await?;
        self.catalog.insert_league(&league).await
    }

    pub async fn get_league(&self, short_name: &str) -> Result<League, ArchiveError> {
        self.catalog
            .get_league(short_name)
            .await?
            .ok_or_else(|| ArchiveError::not_found("league", short_name))
    }

    pub async fn list_leagues(&self) -> Result<Vec<League>, ArchiveError> {
        self.catalog.list_leagues().await
    }

    pub async fn create_conference(
        &self,
        conference: Conference,
    ) -> Result<Conference, ArchiveError> {
        validation::require_short_name(&conference.short_name, "short_name")?;
        validation::require_long_name(&conference.long_name, "long_name")?;
        validate_season_span(conference.first_season_year, conference.last_season_year)?;
        self.require_league_exists(&conference.league_name).await?;
        self.catalog.insert_conference(&conference).await
    }

    pub async fn get_conference(&self, short_name: &str) -> Result<Conference, ArchiveError> {
        self.catalog
            .get_conference(short_name)
            .await?
            .ok_or_else(|| ArchiveError::not_found("conference", short_name))
    }

    pub async fn list_conferences(&self) -> Result<Vec<Conference>, ArchiveError> {
        self.catalog.list_conferences().await
    }

    pub async fn create_division(&self, division: Division) -> Result<Division, ArchiveError> {
        validation::require_long_name(&division.name, "name")?;
        validate_season_span(division.first_season_year, division.last_season_year)?;
        self.require_league_exists(&division.league_name).await?;
        if let Some(conference_name) = &division.conference_name {
            if self.catalog.get_conference(conference_name).await?.is_none() {
                return Err(ArchiveError::not_found("conference", conference_name));
            }
        }
        self.catalog.insert_division(&division).await
    }

    pub async fn get_division(&self, name: &str) -> Result<Division, ArchiveError> {
        self.catalog
            .get_division(name)
            .await?
            .ok_or_else(|| ArchiveError::not_found("division", name))
    }

    pub async fn list_divisions(&self) -> Result<Vec<Division>, ArchiveError> {
        self.catalog.list_divisions().await
    }

    pub async fn create_team(&self, team: Team) -> Result<Team, ArchiveError> {
        validation::require_long_name(&team.name, "name")?;
        self.catalog.insert_team(&team).await
    }

    pub async fn get_team(&self, name: &str) -> Result<Team, ArchiveError> {
        self.catalog
            .get_team(name)
            .await?
            .ok_or_else(|| ArchiveError::not_found("team", name))
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>, ArchiveError> {
        self.catalog.list_teams().await
    }

    /// Materialize the counter row for a team entering a season
    ///
    /// Also materializes the league-season aggregate row when this is the
    /// league's first team in that year.
    pub async fn create_team_season(
        &self,
        team_name: Option<String>,
        season_year: Option<i32>,
        league_name: Option<String>,
    ) -> Result<TeamSeason, ArchiveError> {
        let team_name = guard::require(team_name, "team_name")?;
        let season_year = guard::require(season_year, "season_year")?;
        let league_name = guard::require(league_name, "league_name")?;

        self.get_team(&team_name).await?;
        self.require_season_exists(season_year).await?;
        self.require_league_exists(&league_name).await?;

        if self
            .games
            .get_league_season(&league_name, season_year)
            .await?
            .is_none()
        {
            self.catalog
                .insert_league_season(&LeagueSeason::new(league_name.clone(), season_year))
                .await?;
        }

        self.catalog
            .insert_team_season(&TeamSeason::new(team_name, season_year, league_name))
            .await
    }

    pub async fn get_team_season(
        &self,
        team_name: &str,
        season_year: i32,
    ) -> Result<TeamSeason, ArchiveError> {
        self.games
            .get_team_season(team_name, season_year)
            .await?
            .ok_or_else(|| {
                ArchiveError::not_found("team season", format!("{}/{}", team_name, season_year))
            })
    }

    pub async fn list_team_seasons(&self, season_year: i32) -> Result<Vec<TeamSeason>, ArchiveError> {
        self.games.list_team_seasons(season_year).await
    }

    pub async fn get_league_season(
        &self,
        league_name: &str,
        season_year: i32,
    ) -> Result<LeagueSeason, ArchiveError> {
        self.games
            .get_league_season(league_name, season_year)
            .await?
            .ok_or_else(|| {
                ArchiveError::not_found("league season", format!("{}/{}", league_name, season_year))
            })
    }

    // ===== Reporting =====

    pub async fn standings(&self, season_year: i32) -> Result<Vec<StandingsTeamSeason>, ArchiveError> {
        self.reporting.standings(season_year).await
    }

    pub async fn offensive_rankings(
        &self,
        season_year: i32,
    ) -> Result<Vec<OffensiveRankingsTeamSeason>, ArchiveError> {
        self.reporting.offensive_rankings(season_year).await
    }

    pub async fn defensive_rankings(
        &self,
        season_year: i32,
    ) -> Result<Vec<DefensiveRankingsTeamSeason>, ArchiveError> {
        self.reporting.defensive_rankings(season_year).await
    }

    pub async fn total_rankings(
        &self,
        season_year: i32,
    ) -> Result<Vec<TotalRankingsTeamSeason>, ArchiveError> {
        self.reporting.total_rankings(season_year).await
    }

    pub async fn schedule_profile(
        &self,
        team_name: &str,
        season_year: i32,
    ) -> Result<Vec<TeamSeasonScheduleProfileRecord>, ArchiveError> {
        self.reporting.schedule_profile(team_name, season_year).await
    }

    // ===== Helpers =====

    async fn check_game_references(&self, game: &Game) -> Result<(), ArchiveError> {
        self.require_season_exists(game.season_year).await?;
        if self.catalog.get_team(&game.guest_name).await?.is_none() {
            return Err(ArchiveError::not_found("team", &game.guest_name));
        }
        if self.catalog.get_team(&game.host_name).await?.is_none() {
            return Err(ArchiveError::not_found("team", &game.host_name));
        }
        Ok(())
    }

    async fn require_season_exists(&self, year: i32) -> Result<(), ArchiveError> {
        if self.catalog.get_season(year).await?.is_none() {
            return Err(ArchiveError::not_found("season", year.to_string()));
        }
        Ok(())
    }

    async fn require_league_exists(&self, short_name: &str) -> Result<(), ArchiveError> {
        if self.catalog.get_league(short_name).await?.is_none() {
            return Err(ArchiveError::not_found("league", short_name));
        }
        Ok(())
    }
}

/// Guard and validate a game form into a [`Game`] with cleared derived fields
fn build_game(id: i64, form: GameForm) -> Result<Game, ArchiveError> {
    let season_year = guard::require(form.season_year, "season_year")?;
    let week = guard::require(form.week, "week")?;
    let guest_name = guard::require(form.guest_name, "guest_name")?;
    let guest_score = guard::require(form.guest_score, "guest_score")?;
    let host_name = guard::require(form.host_name, "host_name")?;
    let host_score = guard::require(form.host_score, "host_score")?;

    validation::require_valid_year(season_year)?;
    validation::require_non_negative(week, "week")?;
    validation::require_non_empty(&guest_name, "guest_name")?;
    validation::require_non_empty(&host_name, "host_name")?;
    validation::require_non_negative(guest_score, "guest_score")?;
    validation::require_non_negative(host_score, "host_score")?;
    if guest_name == host_name {
        return Err(ArchiveError::Validation {
            message: "guest_name and host_name must differ".to_string(),
        });
    }

    Ok(Game {
        id,
        season_year,
        week,
        guest_name,
        guest_score,
        host_name,
        host_score,
        winner_name: None,
        winner_score: None,
        loser_name: None,
        loser_score: None,
        is_playoff: form.is_playoff,
        notes: form.notes,
    })
}

/// (team, year) pairs touched by a set of games, deduplicated
pub(crate) fn affected_pairs(games: &[&Game]) -> Vec<(String, i32)> {
    let mut pairs: Vec<(String, i32)> = Vec::new();
    for game in games {
        for name in [&game.guest_name, &game.host_name] {
            let pair = (name.clone(), game.season_year);
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
    }
    pairs
}

/// Refresh league-season totals and league-relative factors
///
/// For every league touched by the given (team, year) pairs: re-derive the
/// league-season totals from the games visible in this transaction, then
/// refresh the factors of the touched team-seasons against the new league
/// average. Teams without a materialized team-season row are skipped.
pub(crate) async fn refresh_aggregates(
    tx: &mut dyn GameStoreTx,
    pairs: &[(String, i32)],
) -> Result<(), ArchiveError> {
    // league (name, year) -> points per team per game
    let mut league_averages: HashMap<(String, i32), Option<Decimal>> = HashMap::new();

    for (team_name, season_year) in pairs {
        let Some(ts) = tx.get_team_season(team_name, *season_year).await? else {
            continue;
        };
        let key = (ts.league_name.clone(), *season_year);
        if league_averages.contains_key(&key) {
            continue;
        }

        let totals = tx.league_season_totals(&ts.league_name, *season_year).await?;
        let per_team = match tx.get_league_season(&ts.league_name, *season_year).await? {
            Some(mut ls) => {
                ls.update_games_and_points(totals.total_games, totals.total_points);
                tx.save_league_season(&ls).await?;
                ls.points_per_team()
            }
            None => None,
        };
        league_averages.insert(key, per_team);
    }

    for (team_name, season_year) in pairs {
        if let Some(mut ts) = tx.get_team_season(team_name, *season_year).await? {
            let key = (ts.league_name.clone(), *season_year);
            let per_team = league_averages.get(&key).copied().flatten();
            ts.update_factors(per_team);
            tx.save_team_season(&ts).await?;
        }
    }

    Ok(())
}

fn validate_season_span(first: i32, last: Option<i32>) -> Result<(), ArchiveError> {
    validation::require_valid_year(first)?;
    if let Some(last) = last {
        validation::require_valid_year(last)?;
        if last < first {
            return Err(ArchiveError::Validation {
                message: "last_season_year must not precede first_season_year".to_string(),
            });
        }
    }
    Ok(())
}
