//! In-memory archive used by the integration tests
//!
//! One struct implements all three ports. Transactions copy the store
//! state, mutate the copy and swap it back on commit, so a dropped
//! transaction leaves the committed state untouched.

// not every test binary exercises every helper
#![allow(dead_code)]

use async_trait::async_trait;
use gridiron_archive::contract::{
    ArchiveError, Conference, DefensiveRankingsTeamSeason, Division, Game, League, LeagueSeason,
    LeagueSeasonTotals, OffensiveRankingsTeamSeason, Season, StandingsTeamSeason, Team, TeamSeason,
    TeamSeasonScheduleProfileRecord, TotalRankingsTeamSeason,
};
use gridiron_archive::domain::{
    CatalogRepository, GameStore, GameStoreTx, ReportingRepository, Service, WeeklyUpdateService,
};
use parking_lot::RwLock;
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
struct StoreState {
    games: BTreeMap<i64, Game>,
    next_game_id: i64,
    team_seasons: BTreeMap<(String, i32), TeamSeason>,
    league_seasons: BTreeMap<(String, i32), LeagueSeason>,
}

#[derive(Debug, Default)]
struct CatalogState {
    seasons: BTreeMap<i32, Season>,
    leagues: BTreeMap<String, League>,
    conferences: BTreeMap<String, Conference>,
    divisions: BTreeMap<String, Division>,
    teams: BTreeMap<String, Team>,
}

/// In-memory implementation of every archive port
#[derive(Default)]
pub struct MemoryArchive {
    catalog: RwLock<CatalogState>,
    store: Arc<RwLock<StoreState>>,
}

impl MemoryArchive {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // ===== Seed helpers =====

    pub fn seed_season(&self, year: i32, num_of_weeks_scheduled: i32) {
        self.catalog.write().seasons.insert(
            year,
            Season {
                year,
                num_of_weeks_scheduled,
                num_of_weeks_completed: 0,
            },
        );
    }

    pub fn seed_league(&self, short_name: &str, long_name: &str, first_season_year: i32) {
        self.catalog.write().leagues.insert(
            short_name.to_string(),
            League {
                short_name: short_name.to_string(),
                long_name: long_name.to_string(),
                first_season_year,
                last_season_year: None,
            },
        );
    }

    pub fn seed_team(&self, name: &str) {
        self.catalog.write().teams.insert(
            name.to_string(),
            Team {
                name: name.to_string(),
            },
        );
    }

    /// Materialize team-season and league-season rows like the service does
    pub fn seed_team_season(&self, team_name: &str, season_year: i32, league_name: &str) {
        let mut store = self.store.write();
        store
            .league_seasons
            .entry((league_name.to_string(), season_year))
            .or_insert_with(|| LeagueSeason::new(league_name.to_string(), season_year));
        store.team_seasons.insert(
            (team_name.to_string(), season_year),
            TeamSeason::new(
                team_name.to_string(),
                season_year,
                league_name.to_string(),
            ),
        );
    }

    /// Store a game without applying it; the weekly batch picks it up
    pub fn seed_unprocessed_game(
        &self,
        season_year: i32,
        week: i32,
        guest_name: &str,
        guest_score: i32,
        host_name: &str,
        host_score: i32,
    ) -> i64 {
        let mut store = self.store.write();
        store.next_game_id += 1;
        let id = store.next_game_id;
        let mut game = Game {
            id,
            season_year,
            week,
            guest_name: guest_name.to_string(),
            guest_score,
            host_name: host_name.to_string(),
            host_score,
            winner_name: None,
            winner_score: None,
            loser_name: None,
            loser_score: None,
            is_playoff: false,
            notes: None,
        };
        game.decide_winner_and_loser();
        store.games.insert(id, game);
        id
    }

    // ===== Committed-state accessors =====

    pub fn team_season(&self, team_name: &str, season_year: i32) -> Option<TeamSeason> {
        self.store
            .read()
            .team_seasons
            .get(&(team_name.to_string(), season_year))
            .cloned()
    }

    pub fn league_season(&self, league_name: &str, season_year: i32) -> Option<LeagueSeason> {
        self.store
            .read()
            .league_seasons
            .get(&(league_name.to_string(), season_year))
            .cloned()
    }

    pub fn game_count(&self) -> usize {
        self.store.read().games.len()
    }
}

/// Wire a service over one shared in-memory archive
pub fn service_over(archive: &Arc<MemoryArchive>) -> Service {
    Service::new(archive.clone(), archive.clone(), archive.clone())
}

/// Wire a weekly update service over the same archive
pub fn weekly_over(archive: &Arc<MemoryArchive>) -> WeeklyUpdateService {
    WeeklyUpdateService::new(archive.clone())
}

fn conflict(what: &str, key: impl std::fmt::Display) -> ArchiveError {
    ArchiveError::Conflict {
        reason: format!("{} '{}' already exists", what, key),
    }
}

#[async_trait]
impl CatalogRepository for MemoryArchive {
    async fn insert_season(&self, season: &Season) -> Result<Season, ArchiveError> {
        let mut catalog = self.catalog.write();
        if catalog.seasons.contains_key(&season.year) {
            return Err(conflict("season", season.year));
        }
        catalog.seasons.insert(season.year, season.clone());
        Ok(season.clone())
    }

    async fn get_season(&self, year: i32) -> Result<Option<Season>, ArchiveError> {
        Ok(self.catalog.read().seasons.get(&year).cloned())
    }

    async fn list_seasons(&self) -> Result<Vec<Season>, ArchiveError> {
        Ok(self.catalog.read().seasons.values().cloned().collect())
    }

    async fn insert_league(&self, league: &League) -> Result<League, ArchiveError> {
        let mut catalog = self.catalog.write();
        let duplicate = catalog.leagues.contains_key(&league.short_name)
            || catalog
                .leagues
                .values()
                .any(|l| l.long_name == league.long_name);
        if duplicate {
            return Err(conflict("league", &league.short_name));
        }
        catalog
            .leagues
            .insert(league.short_name.clone(), league.clone());
        Ok(league.clone())
    }

    async fn get_league(&self, short_name: &str) -> Result<Option<League>, ArchiveError> {
        Ok(self.catalog.read().leagues.get(short_name).cloned())
    }

    async fn list_leagues(&self) -> Result<Vec<League>, ArchiveError> {
        Ok(self.catalog.read().leagues.values().cloned().collect())
    }

    async fn insert_conference(&self, conference: &Conference) -> Result<Conference, ArchiveError> {
        let mut catalog = self.catalog.write();
        if catalog.conferences.contains_key(&conference.short_name) {
            return Err(conflict("conference", &conference.short_name));
        }
        catalog
            .conferences
            .insert(conference.short_name.clone(), conference.clone());
        Ok(conference.clone())
    }

    async fn get_conference(&self, short_name: &str) -> Result<Option<Conference>, ArchiveError> {
        Ok(self.catalog.read().conferences.get(short_name).cloned())
    }

    async fn list_conferences(&self) -> Result<Vec<Conference>, ArchiveError> {
        Ok(self.catalog.read().conferences.values().cloned().collect())
    }

    async fn insert_division(&self, division: &Division) -> Result<Division, ArchiveError> {
        let mut catalog = self.catalog.write();
        if catalog.divisions.contains_key(&division.name) {
            return Err(conflict("division", &division.name));
        }
        catalog
            .divisions
            .insert(division.name.clone(), division.clone());
        Ok(division.clone())
    }

    async fn get_division(&self, name: &str) -> Result<Option<Division>, ArchiveError> {
        Ok(self.catalog.read().divisions.get(name).cloned())
    }

    async fn list_divisions(&self) -> Result<Vec<Division>, ArchiveError> {
        Ok(self.catalog.read().divisions.values().cloned().collect())
    }

    async fn insert_team(&self, team: &Team) -> Result<Team, ArchiveError> {
        let mut catalog = self.catalog.write();
        if catalog.teams.contains_key(&team.name) {
            return Err(conflict("team", &team.name));
        }
        catalog.teams.insert(team.name.clone(), team.clone());
        Ok(team.clone())
    }

    async fn get_team(&self, name: &str) -> Result<Option<Team>, ArchiveError> {
        Ok(self.catalog.read().teams.get(name).cloned())
    }

    async fn list_teams(&self) -> Result<Vec<Team>, ArchiveError> {
        Ok(self.catalog.read().teams.values().cloned().collect())
    }

    async fn insert_team_season(
        &self,
        team_season: &TeamSeason,
    ) -> Result<TeamSeason, ArchiveError> {
        let mut store = self.store.write();
        let key = (team_season.team_name.clone(), team_season.season_year);
        if store.team_seasons.contains_key(&key) {
            return Err(conflict("team season", &team_season.team_name));
        }
        store.team_seasons.insert(key, team_season.clone());
        Ok(team_season.clone())
    }

    async fn insert_league_season(
        &self,
        league_season: &LeagueSeason,
    ) -> Result<LeagueSeason, ArchiveError> {
        let mut store = self.store.write();
        let key = (league_season.league_name.clone(), league_season.season_year);
        if store.league_seasons.contains_key(&key) {
            return Err(conflict("league season", &league_season.league_name));
        }
        store.league_seasons.insert(key, league_season.clone());
        Ok(league_season.clone())
    }
}

#[async_trait]
impl GameStore for MemoryArchive {
    async fn begin(&self) -> Result<Box<dyn GameStoreTx>, ArchiveError> {
        let working = self.store.read().clone();
        Ok(Box::new(MemoryTx {
            committed: self.store.clone(),
            working,
        }))
    }

    async fn get_game(&self, id: i64) -> Result<Option<Game>, ArchiveError> {
        Ok(self.store.read().games.get(&id).cloned())
    }

    async fn list_games(
        &self,
        season_year: Option<i32>,
        week: Option<i32>,
    ) -> Result<Vec<Game>, ArchiveError> {
        Ok(self
            .store
            .read()
            .games
            .values()
            .filter(|g| season_year.map_or(true, |y| g.season_year == y))
            .filter(|g| week.map_or(true, |w| g.week == w))
            .cloned()
            .collect())
    }

    async fn get_team_season(
        &self,
        team_name: &str,
        season_year: i32,
    ) -> Result<Option<TeamSeason>, ArchiveError> {
        Ok(self
            .store
            .read()
            .team_seasons
            .get(&(team_name.to_string(), season_year))
            .cloned())
    }

    async fn list_team_seasons(&self, season_year: i32) -> Result<Vec<TeamSeason>, ArchiveError> {
        Ok(self
            .store
            .read()
            .team_seasons
            .values()
            .filter(|ts| ts.season_year == season_year)
            .cloned()
            .collect())
    }

    async fn get_league_season(
        &self,
        league_name: &str,
        season_year: i32,
    ) -> Result<Option<LeagueSeason>, ArchiveError> {
        Ok(self
            .store
            .read()
            .league_seasons
            .get(&(league_name.to_string(), season_year))
            .cloned())
    }
}

struct MemoryTx {
    committed: Arc<RwLock<StoreState>>,
    working: StoreState,
}

#[async_trait]
impl GameStoreTx for MemoryTx {
    async fn get_game(&self, id: i64) -> Result<Option<Game>, ArchiveError> {
        Ok(self.working.games.get(&id).cloned())
    }

    async fn insert_game(&mut self, game: &Game) -> Result<Game, ArchiveError> {
        self.working.next_game_id += 1;
        let mut stored = game.clone();
        stored.id = self.working.next_game_id;
        self.working.games.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_game(&mut self, game: &Game) -> Result<Game, ArchiveError> {
        if !self.working.games.contains_key(&game.id) {
            return Err(ArchiveError::not_found("game", game.id.to_string()));
        }
        self.working.games.insert(game.id, game.clone());
        Ok(game.clone())
    }

    async fn delete_game(&mut self, id: i64) -> Result<(), ArchiveError> {
        self.working.games.remove(&id);
        Ok(())
    }

    async fn list_games_for_week(
        &self,
        season_year: i32,
        week: i32,
    ) -> Result<Vec<Game>, ArchiveError> {
        Ok(self
            .working
            .games
            .values()
            .filter(|g| g.season_year == season_year && g.week == week)
            .cloned()
            .collect())
    }

    async fn get_team_season(
        &self,
        team_name: &str,
        season_year: i32,
    ) -> Result<Option<TeamSeason>, ArchiveError> {
        Ok(self
            .working
            .team_seasons
            .get(&(team_name.to_string(), season_year))
            .cloned())
    }

    async fn save_team_season(&mut self, team_season: &TeamSeason) -> Result<(), ArchiveError> {
        self.working.team_seasons.insert(
            (team_season.team_name.clone(), team_season.season_year),
            team_season.clone(),
        );
        Ok(())
    }

    async fn get_league_season(
        &self,
        league_name: &str,
        season_year: i32,
    ) -> Result<Option<LeagueSeason>, ArchiveError> {
        Ok(self
            .working
            .league_seasons
            .get(&(league_name.to_string(), season_year))
            .cloned())
    }

    async fn save_league_season(
        &mut self,
        league_season: &LeagueSeason,
    ) -> Result<(), ArchiveError> {
        self.working.league_seasons.insert(
            (league_season.league_name.clone(), league_season.season_year),
            league_season.clone(),
        );
        Ok(())
    }

    async fn league_season_totals(
        &self,
        league_name: &str,
        season_year: i32,
    ) -> Result<LeagueSeasonTotals, ArchiveError> {
        let members: HashSet<&str> = self
            .working
            .team_seasons
            .values()
            .filter(|ts| ts.league_name == league_name && ts.season_year == season_year)
            .map(|ts| ts.team_name.as_str())
            .collect();

        let mut total_games = 0;
        let mut total_points = 0;
        let mut weeks = HashSet::new();
        for game in self.working.games.values() {
            if game.season_year != season_year {
                continue;
            }
            if members.contains(game.guest_name.as_str())
                || members.contains(game.host_name.as_str())
            {
                total_games += 1;
                total_points += game.guest_score + game.host_score;
                weeks.insert(game.week);
            }
        }

        let average_points = if total_games > 0 {
            Some(
                (Decimal::from(total_points) / Decimal::from(total_games))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            )
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

    async fn commit(self: Box<Self>) -> Result<(), ArchiveError> {
        *self.committed.write() = self.working;
        Ok(())
    }
}

#[async_trait]
impl ReportingRepository for MemoryArchive {
    async fn standings(&self, season_year: i32) -> Result<Vec<StandingsTeamSeason>, ArchiveError> {
        let mut rows: Vec<StandingsTeamSeason> = self
            .list_team_seasons(season_year)
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
            .list_team_seasons(season_year)
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
            .list_team_seasons(season_year)
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
        rows.sort_by_key(|r| (r.defensive_index.is_none(), r.defensive_index));
        Ok(rows)
    }

    async fn total_rankings(
        &self,
        season_year: i32,
    ) -> Result<Vec<TotalRankingsTeamSeason>, ArchiveError> {
        let mut rows: Vec<TotalRankingsTeamSeason> = self
            .list_team_seasons(season_year)
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
                    (Some(expected_wins), games) if games > 0 => Some(
                        (expected_wins / Decimal::from(games)).round_dp_with_strategy(
                            3,
                            RoundingStrategy::MidpointAwayFromZero,
                        ),
                    ),
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
        let mut games: Vec<Game> = self
            .store
            .read()
            .games
            .values()
            .filter(|g| {
                g.season_year == season_year
                    && (g.guest_name == team_name || g.host_name == team_name)
            })
            .cloned()
            .collect();
        games.sort_by_key(|g| (g.week, g.id));

        Ok(games
            .into_iter()
            .map(|g| {
                let (opponent_name, points_for, points_against) = if g.guest_name == team_name {
                    (g.host_name.clone(), g.guest_score, g.host_score)
                } else {
                    (g.guest_name.clone(), g.host_score, g.guest_score)
                };
                let outcome = if g.is_tie() {
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
        (Some(average), Some(factor)) => Some(
            (average * factor)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        ),
        _ => None,
    }
}
