//! API service routes

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    validation::parse_identifier,
};

pub mod experiencias;
pub mod session_times;

/// Create the router for the API service
///
/// `GET /sessionTimes/:id` lists by user id while `PUT` and `DELETE` address
/// a single record; they share one path so the parameter name is shared too.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health_check))
        .route("/sessionTimes", post(session_times::create_session_time))
        .route(
            "/sessionTimes/:id",
            get(session_times::list_session_times)
                .put(session_times::update_session_time)
                .delete(session_times::delete_session_time),
        )
        .route(
            "/experiencias",
            post(experiencias::create_experiencia).get(experiencias::list_experiencias),
        )
        .route(
            "/experiencias/:id",
            get(experiencias::get_experiencia)
                .put(experiencias::update_experiencia)
                .delete(experiencias::delete_experiencia),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Identifier taken from the `:id` path segment.
///
/// Both an undecodable segment and a malformed identifier become
/// `InvalidArgument(message)`.
pub(crate) fn path_identifier(
    path: Result<Path<String>, PathRejection>,
    field: &str,
    message: &str,
) -> ApiResult<Uuid> {
    let raw = match path {
        Ok(Path(raw)) => raw,
        Err(rejection) => {
            warn!("Rejected {} path segment: {}", field, rejection.body_text());
            return Err(ApiError::InvalidArgument(message.to_string()));
        }
    };

    parse_identifier(&raw).map_err(|e| {
        warn!("Rejected {} {:?}: {}", field, raw, e);
        ApiError::InvalidArgument(message.to_string())
    })
}

/// Liveness probe
pub async fn ping() -> &'static str {
    info!("Ping received");
    "pinged"
}

/// Health check endpoint, including store connectivity
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, database) = match &state.db_pool {
        Some(pool) => {
            if common::database::health_check(pool).await {
                (StatusCode::OK, "connected")
            } else {
                (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
            }
        }
        None => (StatusCode::OK, "in-memory"),
    };

    let body = Json(json!({
        "status": if status == StatusCode::OK { "ok" } else { "degraded" },
        "service": "api-service",
        "database": database,
    }));

    (status, body)
}
