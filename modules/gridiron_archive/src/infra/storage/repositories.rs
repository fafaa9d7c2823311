//! SeaORM port implementations
//!
//! The game store transaction wraps a [`DatabaseTransaction`]; dropping it
//! uncommitted rolls back, which is what gives the pipeline its atomicity.

use super::entity;
use crate::contract::{
    ArchiveError, Conference, DefensiveRankingsTeamSeason, Division, Game, League, LeagueSeason,
    LeagueSeasonTotals, OffensiveRankingsTeamSeason, Season, StandingsTeamSeason, Team, TeamSeason,
    TeamSeasonScheduleProfileRecord, TotalRankingsTeamSeason,
};
use crate::domain::repository::{CatalogRepository, GameStore, GameStoreTx, ReportingRepository};
use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;

/// Map a database error onto the contract error kinds
fn map_db_err(err: sea_orm::DbErr) -> ArchiveError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(details)) => {
            ArchiveError::Conflict { reason: details }
        }
        Some(SqlErr::ForeignKeyConstraintViolation(details)) => {
            ArchiveError::Integrity { details }
        }
        _ => ArchiveError::Internal,
    }
}

// ===== Catalog repository =====

pub struct SeaOrmCatalogRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn insert_season(&self, season: &Season) -> Result<Season, ArchiveError> {
        let active: entity::season::ActiveModel = season.into();
        let result = entity::season::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.into())
    }

    async fn get_season(&self, year: i32) -> Result<Option<Season>, ArchiveError> {
        let result = entity::season::Entity::find_by_id(year)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.map(|e| e.into()))
    }

    async fn list_seasons(&self) -> Result<Vec<Season>, ArchiveError> {
        let results = entity::season::Entity::find()
            .order_by_asc(entity::season::Column::Year)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn insert_league(&self, league: &League) -> Result<League, ArchiveError> {
        let active: entity::league::ActiveModel = league.into();
        let result = entity::league::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.into())
    }

    async fn get_league(&self, short_name: &str) -> Result<Option<League>, ArchiveError> {
        let result = entity::league::Entity::find_by_id(short_name)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.map(|e| e.into()))
    }

    async fn list_leagues(&self) -> Result<Vec<League>, ArchiveError> {
        let results = entity::league::Entity::find()
            .order_by_asc(entity::league::Column::FirstSeasonYear)
            .order_by_asc(entity::league::Column::ShortName)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn insert_conference(&self, conference: &Conference) -> Result<Conference, ArchiveError> {
        let active: entity::conference::ActiveModel = conference.into();
        let result = entity::conference::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.into())
    }

    async fn get_conference(&self, short_name: &str) -> Result<Option<Conference>, ArchiveError> {
        let result = entity::conference::Entity::find_by_id(short_name)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.map(|e| e.into()))
    }

    async fn list_conferences(&self) -> Result<Vec<Conference>, ArchiveError> {
        let results = entity::conference::Entity::find()
            .order_by_asc(entity::conference::Column::ShortName)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn insert_division(&self, division: &Division) -> Result<Division, ArchiveError> {
        let active: entity::division::ActiveModel = division.into();
        let result = entity::division::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.into())
    }

    async fn get_division(&self, name: &str) -> Result<Option<Division>, ArchiveError> {
        let result = entity::division::Entity::find_by_id(name)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.map(|e| e.into()))
    }

    async fn list_divisions(&self) -> Result<Vec<Division>, ArchiveError> {
        let results = entity::division::Entity::find()
            .order_by_asc(entity::division::Column::Name)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn insert_team(&self, team: &Team) -> Result<Team, ArchiveError> {
        let active: entity::team::ActiveModel = team.into();
        let result = entity::team::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.into())
    }

    async fn get_team(&self, name: &str) -> Result<Option<Team>, ArchiveError> {
        let result = entity::team::Entity::find_by_id(name)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.map(|e| e.into()))
    }

    async fn list_teams(&self) -> Result<Vec<Team>, ArchiveError> {
        let results = entity::team::Entity::find()
            .order_by_asc(entity::team::Column::Name)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn insert_team_season(
        &self,
        team_season: &TeamSeason,
    ) -> Result<TeamSeason, ArchiveError> {
        let active: entity::team_season::ActiveModel = team_season.into();
        let result = entity::team_season::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.into())
    }

    async fn insert_league_season(
        &self,
        league_season: &LeagueSeason,
    ) -> Result<LeagueSeason, ArchiveError> {
        let active: entity::league_season::ActiveModel = league_season.into();
        let result = entity::league_season::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.into())
    }
}

// ===== Game store =====

pub struct SeaOrmGameStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmGameStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GameStore for SeaOrmGameStore {
    async fn begin(&self) -> Result<Box<dyn GameStoreTx>, ArchiveError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(Box::new(SeaOrmGameStoreTx { txn }))
    }

    async fn get_game(&self, id: i64) -> Result<Option<Game>, ArchiveError> {
        fetch_game(&*self.db, id).await
    }

    async fn list_games(
        &self,
        season_year: Option<i32>,
        week: Option<i32>,
    ) -> Result<Vec<Game>, ArchiveError> {
        let mut query = entity::game::Entity::find();
        if let Some(year) = season_year {
            query = query.filter(entity::game::Column::SeasonYear.eq(year));
        }
        if let Some(week) = week {
            query = query.filter(entity::game::Column::Week.eq(week));
        }
        let results = query
            .order_by_asc(entity::game::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn get_team_season(
        &self,
        team_name: &str,
        season_year: i32,
    ) -> Result<Option<TeamSeason>, ArchiveError> {
        fetch_team_season(&*self.db, team_name, season_year).await
    }

    async fn list_team_seasons(&self, season_year: i32) -> Result<Vec<TeamSeason>, ArchiveError> {
        let results = entity::team_season::Entity::find()
            .filter(entity::team_season::Column::SeasonYear.eq(season_year))
            .order_by_asc(entity::team_season::Column::TeamName)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn get_league_season(
        &self,
        league_name: &str,
        season_year: i32,
    ) -> Result<Option<LeagueSeason>, ArchiveError> {
        fetch_league_season(&*self.db, league_name, season_year).await
    }
}

struct SeaOrmGameStoreTx {
    txn: DatabaseTransaction,
}

#[async_trait]
impl GameStoreTx for SeaOrmGameStoreTx {
    async fn get_game(&self, id: i64) -> Result<Option<Game>, ArchiveError> {
        fetch_game(&self.txn, id).await
    }

    async fn insert_game(&mut self, game: &Game) -> Result<Game, ArchiveError> {
        let active: entity::game::ActiveModel = game.into();
        let result = entity::game::Entity::insert(active)
            .exec_with_returning(&self.txn)
            .await
            .map_err(map_db_err)?;
        Ok(result.into())
    }

    async fn update_game(&mut self, game: &Game) -> Result<Game, ArchiveError> {
        let active: entity::game::ActiveModel = game.into();
        let result = entity::game::Entity::update(active)
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;
        Ok(result.into())
    }

    async fn delete_game(&mut self, id: i64) -> Result<(), ArchiveError> {
        entity::game::Entity::delete_by_id(id)
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn list_games_for_week(
        &self,
        season_year: i32,
        week: i32,
    ) -> Result<Vec<Game>, ArchiveError> {
        let results = entity::game::Entity::find()
            .filter(entity::game::Column::SeasonYear.eq(season_year))
            .filter(entity::game::Column::Week.eq(week))
            .order_by_asc(entity::game::Column::Id)
            .all(&self.txn)
            .await
            .map_err(map_db_err)?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn get_team_season(
        &self,
        team_name: &str,
        season_year: i32,
    ) -> Result<Option<TeamSeason>, ArchiveError> {
        fetch_team_season(&self.txn, team_name, season_year).await
    }

    async fn save_team_season(&mut self, team_season: &TeamSeason) -> Result<(), ArchiveError> {
        let active: entity::team_season::ActiveModel = team_season.into();
        entity::team_season::Entity::update(active)
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn get_league_season(
        &self,
        league_name: &str,
        season_year: i32,
    ) -> Result<Option<LeagueSeason>, ArchiveError> {
        fetch_league_season(&self.txn, league_name, season_year).await
    }

    async fn save_league_season(
        &mut self,
        league_season: &LeagueSeason,
    ) -> Result<(), ArchiveError> {
        let active: entity::league_season::ActiveModel = league_season.into();
        entity::league_season::Entity::update(active)
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn league_season_totals(
        &self,
        league_name: &str,
        season_year: i32,
    ) -> Result<LeagueSeasonTotals, ArchiveError> {
        compute_league_season_totals(&self.txn, league_name, season_year).await
    }

    async fn commit(self: Box<Self>) -> Result<(), ArchiveError> {
        self.txn.commit().await.map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(details))
            | Some(SqlErr::ForeignKeyConstraintViolation(details)) => {
                ArchiveError::Integrity { details }
            }
            _ => ArchiveError::Internal,
        })
    }
}

async fn fetch_game<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Option<Game>, ArchiveError> {
    let result = entity::game::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(result.map(|e| e.into()))
}

async fn fetch_team_season<C: ConnectionTrait>(
    conn: &C,
    team_name: &str,
    season_year: i32,
) -> Result<Option<TeamSeason>, ArchiveError> {
    let result = entity::team_season::Entity::find_by_id((team_name.to_string(), season_year))
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(result.map(|e| e.into()))
}

async fn fetch_league_season<C: ConnectionTrait>(
    conn: &C,
    league_name: &str,
    season_year: i32,
) -> Result<Option<LeagueSeason>, ArchiveError> {
    let result = entity::league_season::Entity::find_by_id((league_name.to_string(), season_year))
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(result.map(|e| e.into()))
}

/// Totals over the games of one league-season
///
/// A game belongs to the league when either participant has a team-season
/// row in it; each game is counted once.
async fn compute_league_season_totals<C: ConnectionTrait>(
    conn: &C,
    league_name: &str,
    season_year: i32,
) -> Result<LeagueSeasonTotals, ArchiveError> {
    let members: HashSet<String> = entity::team_season::Entity::find()
        .filter(entity::team_season::Column::LeagueName.eq(league_name))
        .filter(entity::team_season::Column::SeasonYear.eq(season_year))
        .all(conn)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(|m| m.team_name)
        .collect();

    let games = entity::game::Entity::find()
        .filter(entity::game::Column::SeasonYear.eq(season_year))
        .all(conn)
        .await
        .map_err(map_db_err)?;

    let mut total_games = 0;
    let mut total_points = 0;
    let mut weeks = HashSet::new();
    for game in &games {
        if members.contains(&game.guest_name) || members.contains(&game.host_name) {
            total_games += 1;
            total_points += game.guest_score + game.host_score;
            weeks.insert(game.week);
        }
    }

    let average_points = if total_games > 0 {
        Some(round_dp(
            Decimal::from(total_points) / Decimal::from(total_games),
            2,
        ))
    } else {
        None
    };

    Ok(LeagueSeasonTotals {
        total_games,
        total_points,
        average_points,
        week_count: weeks.len() as i32,
    })
}

// ===== Reporting repository =====

/// Read-only reporting port: ORM reads plus in-process derivation and
/// sorting, no stored procedures
pub struct SeaOrmReportingRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmReportingRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn team_seasons(&self, season_year: i32) -> Result<Vec<TeamSeason>, ArchiveError> {
        let results = entity::team_season::Entity::find()
            .filter(entity::team_season::Column::SeasonYear.eq(season_year))
            .order_by_asc(entity::team_season::Column::TeamName)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }
}

#[async_trait]
impl ReportingRepository for SeaOrmReportingRepository {
    async fn standings(&self, season_year: i32) -> Result<Vec<StandingsTeamSeason>, ArchiveError> {
        let mut rows: Vec<StandingsTeamSeason> = self
            .team_seasons(season_year)
            .await?
            .into_iter()
            .map(|ts| StandingsTeamSeason {
                winning_percentage: ts.winning_percentage(),
                team_name: ts.team_name,
                season_year: ts.season_year,
                league_name: ts.league_name,
                games: ts.games,
                wins: ts.wins,
                losses: ts.losses,
                ties: ts.ties,
                points_for: ts.points_for,
                points_against: ts.points_against,
            })
            .collect();
        rows.sort_by_key(|r| {
            (
                r.winning_percentage.is_none(),
                Reverse(r.winning_percentage),
                Reverse(r.wins),
            )
        });
        Ok(rows)
    }

    async fn offensive_rankings(
        &self,
        season_year: i32,
    ) -> Result<Vec<OffensiveRankingsTeamSeason>, ArchiveError> {
        let mut rows: Vec<OffensiveRankingsTeamSeason> = self
            .team_seasons(season_year)
            .await?
            .into_iter()
            .map(|ts| OffensiveRankingsTeamSeason {
                offensive_index: index_of(ts.offensive_average, ts.offensive_factor),
                team_name: ts.team_name,
                season_year: ts.season_year,
                games: ts.games,
                points_for: ts.points_for,
                offensive_average: ts.offensive_average,
                offensive_factor: ts.offensive_factor,
            })
            .collect();
        rows.sort_by_key(|r| (r.offensive_index.is_none(), Reverse(r.offensive_index)));
        Ok(rows)
    }

    async fn defensive_rankings(
        &self,
        season_year: i32,
    ) -> Result<Vec<DefensiveRankingsTeamSeason>, ArchiveError> {
        let mut rows: Vec<DefensiveRankingsTeamSeason> = self
            .team_seasons(season_year)
            .await?
            .into_iter()
            .map(|ts| DefensiveRankingsTeamSeason {
                defensive_index: index_of(ts.defensive_average, ts.defensive_factor),
                team_name: ts.team_name,
                season_year: ts.season_year,
                games: ts.games,
                points_against: ts.points_against,
                defensive_average: ts.defensive_average,
                defensive_factor: ts.defensive_factor,
            })
            .collect();
        // Lower defensive index ranks first
        rows.sort_by_key(|r| (r.defensive_index.is_none(), r.defensive_index));
        Ok(rows)
    }

    async fn total_rankings(
        &self,
        season_year: i32,
    ) -> Result<Vec<TotalRankingsTeamSeason>, ArchiveError> {
        let mut rows: Vec<TotalRankingsTeamSeason> = self
            .team_seasons(season_year)
            .await?
            .into_iter()
            .map(|ts| {
                let offensive_index = index_of(ts.offensive_average, ts.offensive_factor);
                let defensive_index = index_of(ts.defensive_average, ts.defensive_factor);
                let total_index = match (offensive_index, defensive_index) {
                    (Some(off), Some(def)) => Some(off - def),
                    _ => None,
                };
                let final_expected_winning_percentage = match (ts.expected_wins, ts.games) {
                    (Some(expected_wins), games) if games > 0 => Some(round_dp(
                        expected_wins / Decimal::from(games),
                        3,
                    )),
                    _ => None,
                };
                TotalRankingsTeamSeason {
                    team_name: ts.team_name,
                    season_year: ts.season_year,
                    offensive_index,
                    defensive_index,
                    total_index,
                    final_expected_winning_percentage,
                }
            })
            .collect();
        rows.sort_by_key(|r| (r.total_index.is_none(), Reverse(r.total_index)));
        Ok(rows)
    }

    async fn schedule_profile(
        &self,
        team_name: &str,
        season_year: i32,
    ) -> Result<Vec<TeamSeasonScheduleProfileRecord>, ArchiveError> {
        let games = entity::game::Entity::find()
            .filter(entity::game::Column::SeasonYear.eq(season_year))
            .filter(
                entity::game::Column::GuestName
                    .eq(team_name)
                    .or(entity::game::Column::HostName.eq(team_name)),
            )
            .order_by_asc(entity::game::Column::Week)
            .order_by_asc(entity::game::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(games
            .into_iter()
            .map(|g| {
                let (opponent_name, points_for, points_against) = if g.guest_name == team_name {
                    (g.host_name.clone(), g.guest_score, g.host_score)
                } else {
                    (g.guest_name.clone(), g.host_score, g.guest_score)
                };
                let outcome = if g.guest_score == g.host_score {
                    Some("T".to_string())
                } else if g.winner_name.as_deref() == Some(team_name) {
                    Some("W".to_string())
                } else {
                    Some("L".to_string())
                };
                TeamSeasonScheduleProfileRecord {
                    week: g.week,
                    opponent_name,
                    outcome,
                    points_for,
                    points_against,
                }
            })
            .collect())
    }
}

fn index_of(average: Option<Decimal>, factor: Option<Decimal>) -> Option<Decimal> {
    match (average, factor) {
        (Some(average), Some(factor)) => Some(round_dp(average * factor, 2)),
        _ => None,
    }
}

fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
