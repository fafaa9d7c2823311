//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::domain::{Service, WeeklyUpdateService};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

// ===== Season handlers =====

pub async fn list_seasons(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<ListResponse<SeasonDto>>, Problem> {
    let seasons = service.list_seasons().await.map_err(map_domain_error)?;
    Ok(Json(ListResponse::new(
        seasons.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get_season(
    Extension(service): Extension<Arc<Service>>,
    Path(year): Path<i32>,
) -> Result<Json<SeasonDto>, Problem> {
    let season = service.get_season(year).await.map_err(map_domain_error)?;
    Ok(Json(season.into()))
}

pub async fn create_season(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<SeasonDto>,
) -> Result<(StatusCode, Json<SeasonDto>), Problem> {
    let season = service
        .create_season(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(season.into())))
}

// ===== League handlers =====

pub async fn list_leagues(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<ListResponse<LeagueDto>>, Problem> {
    let leagues = service.list_leagues().await.map_err(map_domain_error)?;
    Ok(Json(ListResponse::new(
        leagues.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get_league(
    Extension(service): Extension<Arc<Service>>,
    Path(short_name): Path<String>,
) -> Result<Json<LeagueDto>, Problem> {
    let league = service
        .get_league(&short_name)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(league.into()))
}

pub async fn create_league(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<LeagueDto>,
) -> Result<(StatusCode, Json<LeagueDto>), Problem> {
    let league = service
        .create_league(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(league.into())))
}

// ===== Conference handlers =====

pub async fn list_conferences(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<ListResponse<ConferenceDto>>, Problem> {
    let conferences = service.list_conferences().await.map_err(map_domain_error)?;
    Ok(Json(ListResponse::new(
        conferences.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get_conference(
    Extension(service): Extension<Arc<Service>>,
    Path(short_name): Path<String>,
) -> Result<Json<ConferenceDto>, Problem> {
    let conference = service
        .get_conference(&short_name)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(conference.into()))
}

pub async fn create_conference(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<ConferenceDto>,
) -> Result<(StatusCode, Json<ConferenceDto>), Problem> {
    let conference = service
        .create_conference(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(conference.into())))
}

// ===== Division handlers =====

pub async fn list_divisions(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<ListResponse<DivisionDto>>, Problem> {
    let divisions = service.list_divisions().await.map_err(map_domain_error)?;
    Ok(Json(ListResponse::new(
        divisions.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get_division(
    Extension(service): Extension<Arc<Service>>,
    Path(name): Path<String>,
) -> Result<Json<DivisionDto>, Problem> {
    let division = service
        .get_division(&name)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(division.into()))
}

pub async fn create_division(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<DivisionDto>,
) -> Result<(StatusCode, Json<DivisionDto>), Problem> {
    let division = service
        .create_division(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(division.into())))
}

// ===== Team handlers =====

pub async fn list_teams(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<ListResponse<TeamDto>>, Problem> {
    let teams = service.list_teams().await.map_err(map_domain_error)?;
    Ok(Json(ListResponse::new(
        teams.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get_team(
    Extension(service): Extension<Arc<Service>>,
    Path(name): Path<String>,
) -> Result<Json<TeamDto>, Problem> {
    let team = service.get_team(&name).await.map_err(map_domain_error)?;
    Ok(Json(team.into()))
}

pub async fn create_team(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<TeamDto>,
) -> Result<(StatusCode, Json<TeamDto>), Problem> {
    let team = service
        .create_team(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(team.into())))
}

// ===== Team-season handlers =====

pub async fn create_team_season(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<CreateTeamSeasonRequest>,
) -> Result<(StatusCode, Json<TeamSeasonDto>), Problem> {
    let ts = service
        .create_team_season(req.team_name, req.season_year, req.league_name)
        .await
        .map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(ts.into())))
}

pub async fn list_team_seasons(
    Extension(service): Extension<Arc<Service>>,
    Path(year): Path<i32>,
) -> Result<Json<ListResponse<TeamSeasonDto>>, Problem> {
    let rows = service
        .list_team_seasons(year)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(ListResponse::new(
        rows.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get_team_season(
    Extension(service): Extension<Arc<Service>>,
    Path((year, team)): Path<(i32, String)>,
) -> Result<Json<TeamSeasonDto>, Problem> {
    let ts = service
        .get_team_season(&team, year)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(ts.into()))
}

pub async fn get_league_season(
    Extension(service): Extension<Arc<Service>>,
    Path((year, league)): Path<(i32, String)>,
) -> Result<Json<LeagueSeasonDto>, Problem> {
    let ls = service
        .get_league_season(&league, year)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(ls.into()))
}

// ===== Game handlers =====

/// Query parameters for listing games
#[derive(Debug, Deserialize)]
pub struct ListGamesQuery {
    /// Filter by season year
    pub year: Option<i32>,
    /// Filter by week, only meaningful together with `year`
    pub week: Option<i32>,
}

pub async fn list_games(
    Extension(service): Extension<Arc<Service>>,
    Query(query): Query<ListGamesQuery>,
) -> Result<Json<ListResponse<GameDto>>, Problem> {
    let games = service
        .list_games(query.year, query.week)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(ListResponse::new(
        games.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get_game(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> Result<Json<GameDto>, Problem> {
    let game = service.get_game(id).await.map_err(map_domain_error)?;
    Ok(Json(game.into()))
}

pub async fn create_game(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<GameFormDto>,
) -> Result<(StatusCode, Json<GameDto>), Problem> {
    let game = service
        .create_game(req.into())
        .await
        .map_err(map_domain_error)?;
    tracing::info!(game_id = game.id, year = game.season_year, week = game.week, "game created");
    Ok((StatusCode::CREATED, Json(game.into())))
}

pub async fn update_game(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i64>,
    Json(req): Json<GameFormDto>,
) -> Result<Json<GameDto>, Problem> {
    let game = service
        .update_game(id, req.into())
        .await
        .map_err(map_domain_error)?;
    tracing::info!(game_id = id, "game updated");
    Ok(Json(game.into()))
}

pub async fn delete_game(
    Extension(service): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service.delete_game(id).await.map_err(map_domain_error)?;
    tracing::info!(game_id = id, "game deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ===== Predictor handler =====

/// Query parameters for a game prediction
#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    pub guest: Option<String>,
    pub host: Option<String>,
    pub year: Option<i32>,
}

pub async fn predict_game(
    Extension(service): Extension<Arc<Service>>,
    Query(query): Query<PredictionQuery>,
) -> Result<Json<PredictionDto>, Problem> {
    let guest = query.guest.clone();
    let host = query.host.clone();
    let prediction = service
        .predict_game(query.guest, query.host, query.year)
        .await
        .map_err(map_domain_error)?;

    // the guards above passed, so all three are present
    let dto = PredictionDto::from_prediction(
        guest.unwrap_or_default(),
        host.unwrap_or_default(),
        query.year.unwrap_or_default(),
        prediction,
    );
    Ok(Json(dto))
}

// ===== Reporting handlers =====

pub async fn standings(
    Extension(service): Extension<Arc<Service>>,
    Path(year): Path<i32>,
) -> Result<Json<ListResponse<StandingsRowDto>>, Problem> {
    let rows = service.standings(year).await.map_err(map_domain_error)?;
    Ok(Json(ListResponse::new(
        rows.into_iter().map(Into::into).collect(),
    )))
}

/// Query parameters for a rankings report
#[derive(Debug, Deserialize)]
pub struct RankingsQuery {
    pub kind: String,
}

/// One of the three ranking reports, selected by the `kind` query
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum RankingsResponse {
    Offensive(ListResponse<OffensiveRankingRowDto>),
    Defensive(ListResponse<DefensiveRankingRowDto>),
    Total(ListResponse<TotalRankingRowDto>),
}

pub async fn rankings(
    Extension(service): Extension<Arc<Service>>,
    Path(year): Path<i32>,
    Query(query): Query<RankingsQuery>,
) -> Result<Json<RankingsResponse>, Problem> {
    let response = match query.kind.as_str() {
        "offensive" => {
            let rows = service
                .offensive_rankings(year)
                .await
                .map_err(map_domain_error)?;
            RankingsResponse::Offensive(ListResponse::new(
                rows.into_iter().map(Into::into).collect(),
            ))
        }
        "defensive" => {
            let rows = service
                .defensive_rankings(year)
                .await
                .map_err(map_domain_error)?;
            RankingsResponse::Defensive(ListResponse::new(
                rows.into_iter().map(Into::into).collect(),
            ))
        }
        "total" => {
            let rows = service
                .total_rankings(year)
                .await
                .map_err(map_domain_error)?;
            RankingsResponse::Total(ListResponse::new(
                rows.into_iter().map(Into::into).collect(),
            ))
        }
        other => {
            return Err(Problem::new(StatusCode::BAD_REQUEST, "Unknown Rankings Kind")
            .with_detail(format!(
                "kind '{}' is not one of offensive, defensive, total",
                other
            )));
        }
    };
    Ok(Json(response))
}

pub async fn schedule_profile(
    Extension(service): Extension<Arc<Service>>,
    Path((year, team)): Path<(i32, String)>,
) -> Result<Json<ListResponse<ScheduleLineDto>>, Problem> {
    let lines = service
        .schedule_profile(&team, year)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(ListResponse::new(
        lines.into_iter().map(Into::into).collect(),
    )))
}

// ===== Weekly update handler =====

pub async fn run_weekly_update(
    Extension(weekly): Extension<Arc<WeeklyUpdateService>>,
    Json(req): Json<WeeklyUpdateRequest>,
) -> Result<Json<WeeklyUpdateSummaryDto>, Problem> {
    let summary = weekly
        .run(req.season_year, req.week)
        .await
        .map_err(map_domain_error)?;
    tracing::info!(
        year = summary.season_year,
        week = summary.week,
        games = summary.games_processed,
        "weekly update committed"
    );
    Ok(Json(summary.into()))
}
