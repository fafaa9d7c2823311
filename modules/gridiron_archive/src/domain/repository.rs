//! Port traits for persistence and reporting
//!
//! These traits define the data access the pipeline requires.
//! Implementations are in infra/storage/repositories.rs; tests provide
//! in-memory mocks.

use crate::contract::{
    ArchiveError, Conference, DefensiveRankingsTeamSeason, Division, Game, League, LeagueSeason,
    LeagueSeasonTotals, OffensiveRankingsTeamSeason, Season, StandingsTeamSeason, Team, TeamSeason,
    TeamSeasonScheduleProfileRecord, TotalRankingsTeamSeason,
};
use async_trait::async_trait;

/// Long-lived catalog rows: create and read only
///
/// Uniqueness violations surface as [`ArchiveError::Conflict`].
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn insert_season(&self, season: &Season) -> Result<Season, ArchiveError>;
    async fn get_season(&self, year: i32) -> Result<Option<Season>, ArchiveError>;
    async fn list_seasons(&self) -> Result<Vec<Season>, ArchiveError>;

    async fn insert_league(&self, league: &League) -> Result<League, ArchiveError>;
    async fn get_league(&self, short_name: &str) -> Result<Option<League>, ArchiveError>;
    async fn list_leagues(&self) -> Result<Vec<League>, ArchiveError>;

    async fn insert_conference(&self, conference: &Conference) -> Result<Conference, ArchiveError>;
    async fn get_conference(&self, short_name: &str) -> Result<Option<Conference>, ArchiveError>;
    async fn list_conferences(&self) -> Result<Vec<Conference>, ArchiveError>;

    async fn insert_division(&self, division: &Division) -> Result<Division, ArchiveError>;
    async fn get_division(&self, name: &str) -> Result<Option<Division>, ArchiveError>;
    async fn list_divisions(&self) -> Result<Vec<Division>, ArchiveError>;

    async fn insert_team(&self, team: &Team) -> Result<Team, ArchiveError>;
    async fn get_team(&self, name: &str) -> Result<Option<Team>, ArchiveError>;
    async fn list_teams(&self) -> Result<Vec<Team>, ArchiveError>;

    /// Materialize the zeroed counter row for a team entering a season
    async fn insert_team_season(&self, team_season: &TeamSeason)
        -> Result<TeamSeason, ArchiveError>;

    /// Materialize the aggregate row for a league entering a season
    async fn insert_league_season(
        &self,
        league_season: &LeagueSeason,
    ) -> Result<LeagueSeason, ArchiveError>;
}

/// Persistence port of the game processing pipeline
///
/// Reads outside a transaction see the last committed state. All mutation
/// goes through a [`GameStoreTx`].
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Open the transaction that bounds one unit of pipeline work
    async fn begin(&self) -> Result<Box<dyn GameStoreTx>, ArchiveError>;

    async fn get_game(&self, id: i64) -> Result<Option<Game>, ArchiveError>;
    async fn list_games(
        &self,
        season_year: Option<i32>,
        week: Option<i32>,
    ) -> Result<Vec<Game>, ArchiveError>;
    async fn get_team_season(
        &self,
        team_name: &str,
        season_year: i32,
    ) -> Result<Option<TeamSeason>, ArchiveError>;
    async fn list_team_seasons(&self, season_year: i32) -> Result<Vec<TeamSeason>, ArchiveError>;
    async fn get_league_season(
        &self,
        league_name: &str,
        season_year: i32,
    ) -> Result<Option<LeagueSeason>, ArchiveError>;
}

/// One transaction against the game store
///
/// Mutations observe read-your-writes within the transaction. Dropping an
/// uncommitted transaction rolls everything back; `commit` surfaces
/// integrity violations after the rollback has happened.
#[async_trait]
pub trait GameStoreTx: Send {
    async fn get_game(&self, id: i64) -> Result<Option<Game>, ArchiveError>;

    /// Insert a new game and return it with its assigned id
    async fn insert_game(&mut self, game: &Game) -> Result<Game, ArchiveError>;
    async fn update_game(&mut self, game: &Game) -> Result<Game, ArchiveError>;
    async fn delete_game(&mut self, id: i64) -> Result<(), ArchiveError>;

    /// Games of one week in insertion order
    async fn list_games_for_week(
        &self,
        season_year: i32,
        week: i32,
    ) -> Result<Vec<Game>, ArchiveError>;

    async fn get_team_season(
        &self,
        team_name: &str,
        season_year: i32,
    ) -> Result<Option<TeamSeason>, ArchiveError>;
    async fn save_team_season(&mut self, team_season: &TeamSeason) -> Result<(), ArchiveError>;

    async fn get_league_season(
        &self,
        league_name: &str,
        season_year: i32,
    ) -> Result<Option<LeagueSeason>, ArchiveError>;
    async fn save_league_season(&mut self, league_season: &LeagueSeason)
        -> Result<(), ArchiveError>;

    /// Totals over the games of one league-season, as currently visible
    /// inside this transaction
    async fn league_season_totals(
        &self,
        league_name: &str,
        season_year: i32,
    ) -> Result<LeagueSeasonTotals, ArchiveError>;

    async fn commit(self: Box<Self>) -> Result<(), ArchiveError>;
}

/// Read-only reporting port, keyed by season year
#[async_trait]
pub trait ReportingRepository: Send + Sync {
    async fn standings(&self, season_year: i32) -> Result<Vec<StandingsTeamSeason>, ArchiveError>;

    async fn offensive_rankings(
        &self,
        season_year: i32,
    ) -> Result<Vec<OffensiveRankingsTeamSeason>, ArchiveError>;

    async fn defensive_rankings(
        &self,
        season_year: i32,
    ) -> Result<Vec<DefensiveRankingsTeamSeason>, ArchiveError>;

    async fn total_rankings(
        &self,
        season_year: i32,
    ) -> Result<Vec<TotalRankingsTeamSeason>, ArchiveError>;

    async fn schedule_profile(
        &self,
        team_name: &str,
        season_year: i32,
    ) -> Result<Vec<TeamSeasonScheduleProfileRecord>, ArchiveError>;
}
