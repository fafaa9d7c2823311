//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract;
use crate::domain::predictor::GamePrediction;
use crate::domain::weekly::WeeklyUpdateSummary;

// ===== Catalog conversions =====

impl From<contract::Season> for SeasonDto {
    fn from(season: contract::Season) -> Self {
        Self {
            year: season.year,
            num_of_weeks_scheduled: season.num_of_weeks_scheduled,
            num_of_weeks_completed: season.num_of_weeks_completed,
        }
    }
}

impl From<SeasonDto> for contract::Season {
    fn from(dto: SeasonDto) -> Self {
        Self {
            year: dto.year,
            num_of_weeks_scheduled: dto.num_of_weeks_scheduled,
            num_of_weeks_completed: dto.num_of_weeks_completed,
        }
    }
}

impl From<contract::League> for LeagueDto {
    fn from(league: contract::League) -> Self {
        Self {
            short_name: league.short_name,
            long_name: league.long_name,
            first_season_year: league.first_season_year,
            last_season_year: league.last_season_year,
        }
    }
}

impl From<LeagueDto> for contract::League {
    fn from(dto: LeagueDto) -> Self {
        Self {
            short_name: dto.short_name,
            long_name: dto.long_name,
            first_season_year: dto.first_season_year,
            last_season_year: dto.last_season_year,
        }
    }
}

impl From<contract::Conference> for ConferenceDto {
    fn from(conference: contract::Conference) -> Self {
        Self {
            short_name: conference.short_name,
            long_name: conference.long_name,
            league_name: conference.league_name,
            first_season_year: conference.first_season_year,
            last_season_year: conference.last_season_year,
        }
    }
}

impl From<ConferenceDto> for contract::Conference {
    fn from(dto: ConferenceDto) -> Self {
        Self {
            short_name: dto.short_name,
            long_name: dto.long_name,
            league_name: dto.league_name,
            first_season_year: dto.first_season_year,
            last_season_year: dto.last_season_year,
        }
    }
}

impl From<contract::Division> for DivisionDto {
    fn from(division: contract::Division) -> Self {
        Self {
            name: division.name,
            league_name: division.league_name,
            conference_name: division.conference_name,
            first_season_year: division.first_season_year,
            last_season_year: division.last_season_year,
        }
    }
}

impl From<DivisionDto> for contract::Division {
    fn from(dto: DivisionDto) -> Self {
        Self {
            name: dto.name,
            league_name: dto.league_name,
            conference_name: dto.conference_name,
            first_season_year: dto.first_season_year,
            last_season_year: dto.last_season_year,
        }
    }
}

impl From<contract::Team> for TeamDto {
    fn from(team: contract::Team) -> Self {
        Self { name: team.name }
    }
}

impl From<TeamDto> for contract::Team {
    fn from(dto: TeamDto) -> Self {
        Self { name: dto.name }
    }
}

// ===== Game conversions =====

impl From<contract::Game> for GameDto {
    fn from(game: contract::Game) -> Self {
        Self {
            id: game.id,
            season_year: game.season_year,
            week: game.week,
            guest_name: game.guest_name,
            guest_score: game.guest_score,
            host_name: game.host_name,
            host_score: game.host_score,
            winner_name: game.winner_name,
            winner_score: game.winner_score,
            loser_name: game.loser_name,
            loser_score: game.loser_score,
            is_playoff: game.is_playoff,
            notes: game.notes,
        }
    }
}

impl From<GameFormDto> for contract::GameForm {
    fn from(dto: GameFormDto) -> Self {
        Self {
            season_year: dto.season_year,
            week: dto.week,
            guest_name: dto.guest_name,
            guest_score: dto.guest_score,
            host_name: dto.host_name,
            host_score: dto.host_score,
            is_playoff: dto.is_playoff,
            notes: dto.notes,
        }
    }
}

// ===== Aggregate conversions =====

impl From<contract::TeamSeason> for TeamSeasonDto {
    fn from(ts: contract::TeamSeason) -> Self {
        Self {
            team_name: ts.team_name,
            season_year: ts.season_year,
            league_name: ts.league_name,
            games: ts.games,
            wins: ts.wins,
            losses: ts.losses,
            ties: ts.ties,
            points_for: ts.points_for,
            points_against: ts.points_against,
            offensive_average: ts.offensive_average,
            defensive_average: ts.defensive_average,
            offensive_factor: ts.offensive_factor,
            defensive_factor: ts.defensive_factor,
            expected_wins: ts.expected_wins,
            expected_losses: ts.expected_losses,
        }
    }
}

impl From<contract::LeagueSeason> for LeagueSeasonDto {
    fn from(ls: contract::LeagueSeason) -> Self {
        Self {
            league_name: ls.league_name,
            season_year: ls.season_year,
            total_games: ls.total_games,
            total_points: ls.total_points,
            average_points: ls.average_points,
        }
    }
}

// ===== Predictor conversions =====

impl PredictionDto {
    pub fn from_prediction(
        guest_name: String,
        host_name: String,
        season_year: i32,
        prediction: GamePrediction,
    ) -> Self {
        let (guest_score, host_score) = match prediction {
            GamePrediction::Estimate {
                guest_score,
                host_score,
            } => (Some(guest_score), Some(host_score)),
            GamePrediction::Unknown => (None, None),
        };
        Self {
            guest_name,
            host_name,
            season_year,
            guest_score,
            host_score,
        }
    }
}

// ===== Reporting conversions =====

impl From<contract::StandingsTeamSeason> for StandingsRowDto {
    fn from(row: contract::StandingsTeamSeason) -> Self {
        Self {
            team_name: row.team_name,
            season_year: row.season_year,
            league_name: row.league_name,
            games: row.games,
            wins: row.wins,
            losses: row.losses,
            ties: row.ties,
            winning_percentage: row.winning_percentage,
            points_for: row.points_for,
            points_against: row.points_against,
        }
    }
}

impl From<contract::OffensiveRankingsTeamSeason> for OffensiveRankingRowDto {
    fn from(row: contract::OffensiveRankingsTeamSeason) -> Self {
        Self {
            team_name: row.team_name,
            season_year: row.season_year,
            games: row.games,
            points_for: row.points_for,
            offensive_average: row.offensive_average,
            offensive_factor: row.offensive_factor,
            offensive_index: row.offensive_index,
        }
    }
}

impl From<contract::DefensiveRankingsTeamSeason> for DefensiveRankingRowDto {
    fn from(row: contract::DefensiveRankingsTeamSeason) -> Self {
        Self {
            team_name: row.team_name,
            season_year: row.season_year,
            games: row.games,
            points_against: row.points_against,
            defensive_average: row.defensive_average,
            defensive_factor: row.defensive_factor,
            defensive_index: row.defensive_index,
        }
    }
}

impl From<contract::TotalRankingsTeamSeason> for TotalRankingRowDto {
    fn from(row: contract::TotalRankingsTeamSeason) -> Self {
        Self {
            team_name: row.team_name,
            season_year: row.season_year,
            offensive_index: row.offensive_index,
            defensive_index: row.defensive_index,
            total_index: row.total_index,
            final_expected_winning_percentage: row.final_expected_winning_percentage,
        }
    }
}

impl From<contract::TeamSeasonScheduleProfileRecord> for ScheduleLineDto {
    fn from(record: contract::TeamSeasonScheduleProfileRecord) -> Self {
        Self {
            week: record.week,
            opponent_name: record.opponent_name,
            outcome: record.outcome,
            points_for: record.points_for,
            points_against: record.points_against,
        }
    }
}

// ===== Weekly update conversions =====

impl From<WeeklyUpdateSummary> for WeeklyUpdateSummaryDto {
    fn from(summary: WeeklyUpdateSummary) -> Self {
        Self {
            season_year: summary.season_year,
            week: summary.week,
            games_processed: summary.games_processed,
        }
    }
}
