//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::domain::TransitTime;
use crate::planner::{Planner, Query, QueryError, QueryOutcome};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stops", get(list_stops))
        .route("/journey/plan", post(plan_journey))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every stop in the timetable.
async fn list_stops(State(state): State<AppState>) -> Json<StopsResponse> {
    let stops = state.index.stops().iter().map(StopResult::from).collect();
    Json(StopsResponse { stops })
}

/// Plan the latest-departure journey arriving by the requested time.
async fn plan_journey(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanJourneyResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanJourneyRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let date = match &req.date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| AppError::BadRequest {
            message: format!("Invalid date: {d}"),
        })?,
        None => state.service_date,
    };

    let arrive_by = TransitTime::parse(&req.arrive_by, date).map_err(|e| AppError::BadRequest {
        message: format!("Invalid arrive_by {}: {e}", req.arrive_by),
    })?;

    let query = Query::resolve(&state.index, &req.origin, &req.destination, arrive_by)?;
    let planner = Planner::new(&state.index, &state.config);
    let outcome = state.cache.plan(&planner, &query).await?;

    let response = match outcome.as_ref() {
        QueryOutcome::Found(journey) => {
            PlanJourneyResponse::found(JourneyResult::from_journey(journey, &state.index))
        }
        QueryOutcome::NoJourneyFound => PlanJourneyResponse::not_found(),
    };

    info!(
        origin = %req.origin,
        destination = %req.destination,
        arrive_by = %arrive_by,
        found = response.found,
        "journey planned"
    );

    Ok(Json(response))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::UnknownStop(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            QueryError::NoPath(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
