//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models.

use super::entity;
use crate::contract::{
    Conference, Division, Game, League, LeagueSeason, Season, Team, TeamSeason,
};
use sea_orm::ActiveValue::{NotSet, Set};

// ===== Season =====

impl From<entity::season::Model> for Season {
    fn from(entity: entity::season::Model) -> Self {
        Self {
            year: entity.year,
            num_of_weeks_scheduled: entity.num_of_weeks_scheduled,
            num_of_weeks_completed: entity.num_of_weeks_completed,
        }
    }
}

impl From<&Season> for entity::season::ActiveModel {
    fn from(model: &Season) -> Self {
        Self {
            year: Set(model.year),
            num_of_weeks_scheduled: Set(model.num_of_weeks_scheduled),
            num_of_weeks_completed: Set(model.num_of_weeks_completed),
        }
    }
}

// ===== League =====

impl From<entity::league::Model> for League {
    fn from(entity: entity::league::Model) -> Self {
        Self {
            short_name: entity.short_name,
            long_name: entity.long_name,
            first_season_year: entity.first_season_year,
            last_season_year: entity.last_season_year,
        }
    }
}

impl From<&League> for entity::league::ActiveModel {
    fn from(model: &League) -> Self {
        Self {
            short_name: Set(model.short_name.clone()),
            long_name: Set(model.long_name.clone()),
            first_season_year: Set(model.first_season_year),
            last_season_year: Set(model.last_season_year),
        }
    }
}

// ===== Conference =====

impl From<entity::conference::Model> for Conference {
    fn from(entity: entity::conference::Model) -> Self {
        Self {
            short_name: entity.short_name,
            long_name: entity.long_name,
            league_name: entity.league_name,
            first_season_year: entity.first_season_year,
            last_season_year: entity.last_season_year,
        }
    }
}

impl From<&Conference> for entity::conference::ActiveModel {
    fn from(model: &Conference) -> Self {
        Self {
            short_name: Set(model.short_name.clone()),
            long_name: Set(model.long_name.clone()),
            league_name: Set(model.league_name.clone()),
            first_season_year: Set(model.first_season_year),
            last_season_year: Set(model.last_season_year),
        }
    }
}

// ===== Division =====

impl From<entity::division::Model> for Division {
    fn from(entity: entity::division::Model) -> Self {
        Self {
            name: entity.name,
            league_name: entity.league_name,
            conference_name: entity.conference_name,
            first_season_year: entity.first_season_year,
            last_season_year: entity.last_season_year,
        }
    }
}

impl From<&Division> for entity::division::ActiveModel {
    fn from(model: &Division) -> Self {
        Self {
            name: Set(model.name.clone()),
            league_name: Set(model.league_name.clone()),
            conference_name: Set(model.conference_name.clone()),
            first_season_year: Set(model.first_season_year),
            last_season_year: Set(model.last_season_year),
        }
    }
}

// ===== Team =====

impl From<entity::team::Model> for Team {
    fn from(entity: entity::team::Model) -> Self {
        Self { name: entity.name }
    }
}

impl From<&Team> for entity::team::ActiveModel {
    fn from(model: &Team) -> Self {
        Self {
            name: Set(model.name.clone()),
        }
    }
}

// ===== Game =====

impl From<entity::game::Model> for Game {
    fn from(entity: entity::game::Model) -> Self {
        Self {
            id: entity.id,
            season_year: entity.season_year,
            week: entity.week,
            guest_name: entity.guest_name,
            guest_score: entity.guest_score,
            host_name: entity.host_name,
            host_score: entity.host_score,
            winner_name: entity.winner_name,
            winner_score: entity.winner_score,
            loser_name: entity.loser_name,
            loser_score: entity.loser_score,
            is_playoff: entity.is_playoff,
            notes: entity.notes,
        }
    }
}

impl From<&Game> for entity::game::ActiveModel {
    fn from(model: &Game) -> Self {
        Self {
            // id 0 marks an unsaved game; the database assigns the real id
            id: if model.id > 0 { Set(model.id) } else { NotSet },
            season_year: Set(model.season_year),
            week: Set(model.week),
            guest_name: Set(model.guest_name.clone()),
            guest_score: Set(model.guest_score),
            host_name: Set(model.host_name.clone()),
            host_score: Set(model.host_score),
            winner_name: Set(model.winner_name.clone()),
            winner_score: Set(model.winner_score),
            loser_name: Set(model.loser_name.clone()),
            loser_score: Set(model.loser_score),
            is_playoff: Set(model.is_playoff),
            notes: Set(model.notes.clone()),
        }
    }
}

// ===== TeamSeason =====

impl From<entity::team_season::Model> for TeamSeason {
    fn from(entity: entity::team_season::Model) -> Self {
        Self {
            team_name: entity.team_name,
            season_year: entity.season_year,
            league_name: entity.league_name,
            games: entity.games,
            wins: entity.wins,
            losses: entity.losses,
            ties: entity.ties,
            points_for: entity.points_for,
            points_against: entity.points_against,
            offensive_average: entity.offensive_average,
            defensive_average: entity.defensive_average,
            offensive_factor: entity.offensive_factor,
            defensive_factor: entity.defensive_factor,
            expected_wins: entity.expected_wins,
            expected_losses: entity.expected_losses,
        }
    }
}

impl From<&TeamSeason> for entity::team_season::ActiveModel {
    fn from(model: &TeamSeason) -> Self {
        Self {
            team_name: Set(model.team_name.clone()),
            season_year: Set(model.season_year),
            league_name: Set(model.league_name.clone()),
            games: Set(model.games),
            wins: Set(model.wins),
            losses: Set(model.losses),
            ties: Set(model.ties),
            points_for: Set(model.points_for),
            points_against: Set(model.points_against),
            offensive_average: Set(model.offensive_average),
            defensive_average: Set(model.defensive_average),
            offensive_factor: Set(model.offensive_factor),
            defensive_factor: Set(model.defensive_factor),
            expected_wins: Set(model.expected_wins),
            expected_losses: Set(model.expected_losses),
        }
    }
}

// ===== LeagueSeason =====

impl From<entity::league_season::Model> for LeagueSeason {
    fn from(entity: entity::league_season::Model) -> Self {
        Self {
            league_name: entity.league_name,
            season_year: entity.season_year,
            total_games: entity.total_games,
            total_points: entity.total_points,
            average_points: entity.average_points,
        }
    }
}

impl From<&LeagueSeason> for entity::league_season::ActiveModel {
    fn from(model: &LeagueSeason) -> Self {
        Self {
            league_name: Set(model.league_name.clone()),
            season_year: Set(model.season_year),
            total_games: Set(model.total_games),
            total_points: Set(model.total_points),
            average_points: Set(model.average_points),
        }
    }
}
