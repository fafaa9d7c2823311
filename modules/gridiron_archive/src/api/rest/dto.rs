//! REST DTOs with serde derives for HTTP API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Catalog DTOs =====

/// Season DTO, used for both requests and responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeasonDto {
    /// Season year, 1920 or later
    #[schema(example = 1925)]
    pub year: i32,

    /// Number of weeks on the schedule
    #[serde(default)]
    pub num_of_weeks_scheduled: i32,

    /// Number of weeks already processed
    #[serde(default)]
    pub num_of_weeks_completed: i32,
}

/// League DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeagueDto {
    /// Unique abbreviation, at most 5 characters
    #[schema(example = "NFL")]
    pub short_name: String,

    /// Unique full name, at most 50 characters
    #[schema(example = "National Football League")]
    pub long_name: String,

    /// First season the league played
    pub first_season_year: i32,

    /// Last season, absent while the league is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_season_year: Option<i32>,
}

/// Conference DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConferenceDto {
    pub short_name: String,
    pub long_name: String,
    pub league_name: String,
    pub first_season_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_season_year: Option<i32>,
}

/// Division DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DivisionDto {
    pub name: String,
    pub league_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference_name: Option<String>,
    pub first_season_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_season_year: Option<i32>,
}

/// Team DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamDto {
    /// Unique franchise name
    #[schema(example = "Chicago Bears")]
    pub name: String,
}

// ===== Game DTOs =====

/// Game response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GameDto {
    pub id: i64,
    pub season_year: i32,
    pub week: i32,
    pub guest_name: String,
    pub guest_score: i32,
    pub host_name: String,
    pub host_score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loser_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loser_score: Option<i32>,
    pub is_playoff: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Game create/update request
///
/// Required fields are optional here so that an absent field reaches the
/// domain guard and comes back as a named bad-request, not a serde error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GameFormDto {
    pub season_year: Option<i32>,
    pub week: Option<i32>,
    pub guest_name: Option<String>,
    pub guest_score: Option<i32>,
    pub host_name: Option<String>,
    pub host_score: Option<i32>,
    #[serde(default)]
    pub is_playoff: bool,
    pub notes: Option<String>,
}

// ===== Aggregate DTOs =====

/// Team-season response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamSeasonDto {
    pub team_name: String,
    pub season_year: i32,
    pub league_name: String,
    pub games: i32,
    pub wins: i32,
    pub losses: i32,
    pub ties: i32,
    pub points_for: i32,
    pub points_against: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offensive_average: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defensive_average: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offensive_factor: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defensive_factor: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_wins: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_losses: Option<Decimal>,
}

/// Team-season create request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTeamSeasonRequest {
    pub team_name: Option<String>,
    pub season_year: Option<i32>,
    pub league_name: Option<String>,
}

/// League-season response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeagueSeasonDto {
    pub league_name: String,
    pub season_year: i32,
    pub total_games: i32,
    pub total_points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_points: Option<Decimal>,
}

// ===== Predictor DTOs =====

/// Predicted final score of an unplayed matchup
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PredictionDto {
    pub guest_name: String,
    pub host_name: String,
    pub season_year: i32,

    /// Absent when either team has no season snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_score: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_score: Option<Decimal>,
}

// ===== Reporting DTOs =====

/// Standings row
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StandingsRowDto {
    pub team_name: String,
    pub season_year: i32,
    pub league_name: String,
    pub games: i32,
    pub wins: i32,
    pub losses: i32,
    pub ties: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_percentage: Option<Decimal>,
    pub points_for: i32,
    pub points_against: i32,
}

/// Offensive rankings row
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OffensiveRankingRowDto {
    pub team_name: String,
    pub season_year: i32,
    pub games: i32,
    pub points_for: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offensive_average: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offensive_factor: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offensive_index: Option<Decimal>,
}

/// Defensive rankings row
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DefensiveRankingRowDto {
    pub team_name: String,
    pub season_year: i32,
    pub games: i32,
    pub points_against: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defensive_average: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defensive_factor: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defensive_index: Option<Decimal>,
}

/// Combined rankings row
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TotalRankingRowDto {
    pub team_name: String,
    pub season_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offensive_index: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defensive_index: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_index: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_expected_winning_percentage: Option<Decimal>,
}

/// One line of a team's season schedule
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleLineDto {
    pub week: i32,
    pub opponent_name: String,
    /// "W", "L" or "T" once decided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    pub points_for: i32,
    pub points_against: i32,
}

// ===== Weekly update DTOs =====

/// Weekly update request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WeeklyUpdateRequest {
    pub season_year: Option<i32>,
    pub week: Option<i32>,
}

/// Weekly update outcome
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeeklyUpdateSummaryDto {
    pub season_year: i32,
    pub week: i32,
    pub games_processed: usize,
}

// ===== List Response DTOs =====

/// Generic list envelope
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListResponse<T> {
    /// Items in storage order for the endpoint
    pub items: Vec<T>,

    /// Total count
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}
