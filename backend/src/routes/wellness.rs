//! Wellness API routes

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::{ExportService, WellnessUpdate};
use crate::state::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use wellness_coach_shared::types::{
    FitnessSyncRequest, HistoryResponse, LogMealRequest, LogMealResponse, LogWaterRequest,
    WellnessResponse,
};
use wellness_coach_shared::FitnessReading;

/// Create wellness routes
pub fn wellness_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_wellness))
        .route("/fitness", post(record_fitness))
        .route("/fitness/sync", post(sync_fitness))
        .route("/meals", post(log_meal))
        .route("/water", post(log_water))
        .route("/history", get(get_history))
        .route("/history/export", get(export_history))
}

fn respond(update: WellnessUpdate) -> Json<WellnessResponse> {
    Json(WellnessResponse::new(&update.state, update.rolled_over))
}

/// GET /api/v1/wellness - Today's goals and scores
///
/// Closes the previous day first if it has ended.
async fn get_wellness(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<WellnessResponse>> {
    let update = state.wellness().get_state(auth.user_id, Utc::now()).await?;
    Ok(respond(update))
}

/// POST /api/v1/wellness/fitness - Apply a fitness tracker reading
async fn record_fitness(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(reading): Json<FitnessReading>,
) -> ApiResult<Json<WellnessResponse>> {
    let update = state
        .wellness()
        .record_fitness(auth.user_id, reading, Utc::now())
        .await?;
    Ok(respond(update))
}

/// POST /api/v1/wellness/fitness/sync - Pull today's data from the provider
async fn sync_fitness(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<FitnessSyncRequest>,
) -> ApiResult<Json<WellnessResponse>> {
    let update = state
        .wellness()
        .sync_fitness(auth.user_id, &req.access_token, Utc::now())
        .await?;
    Ok(respond(update))
}

/// POST /api/v1/wellness/meals - Log a meal
///
/// Accepts detected food items or plain nutrition totals.
async fn log_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogMealRequest>,
) -> ApiResult<Json<LogMealResponse>> {
    let logged = state.wellness().log_meal(auth.user_id, req, Utc::now()).await?;

    Ok(Json(LogMealResponse {
        wellness: WellnessResponse::new(&logged.update.state, logged.update.rolled_over),
        analysis: logged.analysis,
    }))
}

/// POST /api/v1/wellness/water - Log glasses of water
async fn log_water(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogWaterRequest>,
) -> ApiResult<Json<WellnessResponse>> {
    if !req.glasses.is_finite() {
        return Err(ApiError::Validation("glasses must be a finite number".to_string()));
    }

    let update = state
        .wellness()
        .log_water(auth.user_id, req.glasses, Utc::now())
        .await?;
    Ok(respond(update))
}

/// GET /api/v1/wellness/history - Past daily scores with summary
async fn get_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<HistoryResponse>> {
    let update = state.wellness().get_state(auth.user_id, Utc::now()).await?;
    let history = update.state.score_history();

    Ok(Json(HistoryResponse {
        entries: history.iter().copied().collect(),
        summary: history.summary(),
    }))
}

/// GET /api/v1/wellness/history/export - Score history as CSV
async fn export_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let update = state.wellness().get_state(auth.user_id, Utc::now()).await?;
    let csv = ExportService::history_csv(update.state.score_history())?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"wellness-history.csv\"",
            ),
        ],
        csv,
    ))
}
