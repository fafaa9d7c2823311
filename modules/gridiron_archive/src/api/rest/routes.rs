//! Route registration for the archive REST API

use super::handlers;
use crate::domain::{Service, WeeklyUpdateService};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

/// Build the archive router with all endpoints
pub fn router(service: Arc<Service>, weekly: Arc<WeeklyUpdateService>) -> Router {
    Router::new()
        // Catalog endpoints
        .route(
            "/seasons",
            get(handlers::list_seasons).post(handlers::create_season),
        )
        .route("/seasons/{year}", get(handlers::get_season))
        .route(
            "/leagues",
            get(handlers::list_leagues).post(handlers::create_league),
        )
        .route("/leagues/{short_name}", get(handlers::get_league))
        .route(
            "/conferences",
            get(handlers::list_conferences).post(handlers::create_conference),
        )
        .route("/conferences/{short_name}", get(handlers::get_conference))
        .route(
            "/divisions",
            get(handlers::list_divisions).post(handlers::create_division),
        )
        .route("/divisions/{name}", get(handlers::get_division))
        .route(
            "/teams",
            get(handlers::list_teams).post(handlers::create_team),
        )
        .route("/teams/{name}", get(handlers::get_team))
        // Participation endpoints
        .route("/team-seasons", post(handlers::create_team_season))
        .route("/team-seasons/{year}", get(handlers::list_team_seasons))
        .route(
            "/team-seasons/{year}/{team}",
            get(handlers::get_team_season),
        )
        .route(
            "/league-seasons/{year}/{league}",
            get(handlers::get_league_season),
        )
        // Game endpoints
        .route(
            "/games",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route(
            "/games/{id}",
            get(handlers::get_game)
                .put(handlers::update_game)
                .delete(handlers::delete_game),
        )
        // Predictor
        .route("/predictions", get(handlers::predict_game))
        // Reporting
        .route("/standings/{year}", get(handlers::standings))
        .route("/rankings/{year}", get(handlers::rankings))
        .route("/schedule/{year}/{team}", get(handlers::schedule_profile))
        // Weekly update
        .route("/weekly-updates", post(handlers::run_weekly_update))
        // Shared services for the handlers
        .layer(Extension(service))
        .layer(Extension(weekly))
}
