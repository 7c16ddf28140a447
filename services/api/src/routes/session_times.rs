//! Session time handlers

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{
        CreateSessionTimeRequest, NewSessionTime, SessionTime, SessionTimeUpdate,
        UpdateSessionTimeRequest,
    },
    routes::path_identifier,
    state::AppState,
    validation::parse_identifier,
};

fn parse_user_id(raw: &str) -> ApiResult<Uuid> {
    parse_identifier(raw).map_err(|e| {
        warn!("Rejected userId {:?}: {}", raw, e);
        ApiError::InvalidArgument("Invalid userId".to_string())
    })
}

fn path_user_id(path: Result<Path<String>, PathRejection>) -> ApiResult<Uuid> {
    path_identifier(path, "userId", "Invalid userId")
}

fn path_session_time_id(path: Result<Path<String>, PathRejection>) -> ApiResult<Uuid> {
    path_identifier(path, "session time id", "Invalid session time ID")
}

/// Record a new session interval for a user
pub async fn create_session_time(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionTimeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SessionTime>)> {
    let Json(payload) = payload?;
    let user_id = parse_user_id(&payload.user_id)?;

    let new = NewSessionTime::new(user_id, payload.start_time, payload.end_time);
    let created = state.session_times.create(&new).await.map_err(|e| {
        error!("Failed to create session time: {}", e);
        ApiError::Unexpected("Failed to create session time".to_string())
    })?;

    info!("Created session time {} for user {}", created.id, user_id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// List every session interval recorded for a user
pub async fn list_session_times(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<SessionTime>>> {
    let user_id = path_user_id(path)?;

    let session_times = state.session_times.find_by_user(user_id).await.map_err(|e| {
        error!("Failed to get session times: {}", e);
        ApiError::Unexpected("Failed to get session times".to_string())
    })?;

    Ok(Json(session_times))
}

/// Replace the interval of an existing record
pub async fn update_session_time(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateSessionTimeRequest>, JsonRejection>,
) -> ApiResult<Json<SessionTime>> {
    let id = path_session_time_id(path)?;
    let Json(payload) = payload?;

    let update = SessionTimeUpdate::new(payload.start_time, payload.end_time);
    let updated = state
        .session_times
        .update_by_id(id, &update)
        .await
        .map_err(|e| {
            error!("Failed to update session time: {}", e);
            ApiError::Unexpected("Failed to update session time".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Session time not found".to_string()))?;

    info!("Updated session time {}", id);
    Ok(Json(updated))
}

/// Remove a record
pub async fn delete_session_time(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = path_session_time_id(path)?;

    let deleted = state.session_times.delete_by_id(id).await.map_err(|e| {
        error!("Failed to delete session time: {}", e);
        ApiError::Unexpected("Failed to delete session time".to_string())
    })?;

    if deleted {
        info!("Deleted session time {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Session time not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::Router;
    use common::error::{DatabaseError, DatabaseResult};
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        repositories::{
            InMemoryExperienciaRepository, InMemorySessionTimeRepository, SessionTimeRepository,
        },
        routes::{create_router, testing::send},
    };

    const USER: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    fn router_with(store: Arc<InMemorySessionTimeRepository>) -> Router {
        create_router(AppState {
            db_pool: None,
            session_times: store,
            experiencias: Arc::new(InMemoryExperienciaRepository::new()),
        })
    }

    fn ten_minutes(user_id: &str) -> Value {
        json!({
            "userId": user_id,
            "startTime": "2024-01-01T00:00:00Z",
            "endTime": "2024-01-01T00:10:00Z"
        })
    }

    /// Store whose every call fails as if the database were down
    struct UnavailableStore;

    #[async_trait]
    impl SessionTimeRepository for UnavailableStore {
        async fn create(&self, _new: &NewSessionTime) -> DatabaseResult<SessionTime> {
            Err(DatabaseError::Connection(sqlx::Error::PoolTimedOut))
        }

        async fn find_by_user(&self, _user_id: Uuid) -> DatabaseResult<Vec<SessionTime>> {
            Err(DatabaseError::Connection(sqlx::Error::PoolTimedOut))
        }

        async fn update_by_id(
            &self,
            _id: Uuid,
            _update: &SessionTimeUpdate,
        ) -> DatabaseResult<Option<SessionTime>> {
            Err(DatabaseError::Connection(sqlx::Error::PoolTimedOut))
        }

        async fn delete_by_id(&self, _id: Uuid) -> DatabaseResult<bool> {
            Err(DatabaseError::Connection(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_create_then_list_reports_duration() {
        let store = Arc::new(InMemorySessionTimeRepository::new());
        let router = router_with(store.clone());

        let (status, created) = send(&router, "POST", "/sessionTimes", Some(ten_minutes(USER))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["userId"], USER);
        assert_eq!(created["duration"], 600.0);
        assert!(created["id"].is_string());

        let (status, listed) = send(&router, "GET", &format!("/sessionTimes/{}", USER), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, Value::Array(vec![created]));
    }

    #[tokio::test]
    async fn test_update_recomputes_duration() {
        let store = Arc::new(InMemorySessionTimeRepository::new());
        let router = router_with(store.clone());

        let (_, created) = send(&router, "POST", "/sessionTimes", Some(ten_minutes(USER))).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, updated) = send(
            &router,
            "PUT",
            &format!("/sessionTimes/{}", id),
            Some(json!({
                "startTime": "2024-01-01T00:00:00Z",
                "endTime": "2024-01-01T00:20:00Z"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], id.as_str());
        assert_eq!(updated["userId"], USER);
        assert_eq!(updated["duration"], 1200.0);

        let stored = store.get(id.parse().unwrap()).await.unwrap();
        assert_eq!(stored.duration, 1200.0);
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let router = router_with(Arc::new(InMemorySessionTimeRepository::new()));
        let (_, created) = send(&router, "POST", "/sessionTimes", Some(ten_minutes(USER))).await;
        let uri = format!("/sessionTimes/{}", created["id"].as_str().unwrap());
        let body = json!({
            "startTime": "2024-01-01T00:05:00Z",
            "endTime": "2024-01-01T00:06:30Z"
        });

        let first = send(&router, "PUT", &uri, Some(body.clone())).await;
        let second = send(&router, "PUT", &uri, Some(body)).await;

        assert_eq!(first.0, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(first.1["duration"], 90.0);
    }

    #[tokio::test]
    async fn test_negative_duration_is_stored() {
        let router = router_with(Arc::new(InMemorySessionTimeRepository::new()));
        let body = json!({
            "userId": USER,
            "startTime": "2024-01-01T00:10:00Z",
            "endTime": "2024-01-01T00:00:00Z"
        });

        let (status, created) = send(&router, "POST", "/sessionTimes", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["duration"], -600.0);
    }

    #[tokio::test]
    async fn test_malformed_identifiers_are_rejected_without_mutation() {
        let store = Arc::new(InMemorySessionTimeRepository::new());
        let router = router_with(store.clone());

        let (_, created) = send(&router, "POST", "/sessionTimes", Some(ten_minutes(USER))).await;
        let original = store.get(created["id"].as_str().unwrap().parse().unwrap()).await;

        for bad in ["not-an-id", "507f1f77bcf86cd799439011", "123", "%FF"] {
            let (status, body) =
                send(&router, "POST", "/sessionTimes", Some(ten_minutes(bad))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Invalid userId" }));

            let (status, body) = send(&router, "GET", &format!("/sessionTimes/{}", bad), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Invalid userId" }));

            let (status, body) = send(
                &router,
                "PUT",
                &format!("/sessionTimes/{}", bad),
                Some(json!({
                    "startTime": "2024-01-01T00:00:00Z",
                    "endTime": "2024-01-01T01:00:00Z"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Invalid session time ID" }));

            let (status, body) =
                send(&router, "DELETE", &format!("/sessionTimes/{}", bad), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Invalid session time ID" }));
        }

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(original.as_ref().unwrap().id).await, original);
    }

    #[tokio::test]
    async fn test_unreadable_body_is_a_bad_request() {
        let store = Arc::new(InMemorySessionTimeRepository::new());
        let router = router_with(store.clone());

        let bodies = [
            json!({ "userId": USER, "startTime": "yesterday", "endTime": "2024-01-01T00:10:00Z" }),
            json!({ "userId": USER, "startTime": "2024-01-01T00:00:00Z" }),
            json!({ "userId": 42, "startTime": "2024-01-01T00:00:00Z", "endTime": "2024-01-01T00:10:00Z" }),
        ];
        for body in bodies {
            let (status, response) = send(&router, "POST", "/sessionTimes", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response, json!({ "error": "Invalid request body" }));
        }

        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let store = Arc::new(InMemorySessionTimeRepository::new());
        let router = router_with(store.clone());

        let (_, created) = send(&router, "POST", "/sessionTimes", Some(ten_minutes(USER))).await;
        let (status, body) = send(
            &router,
            "PUT",
            &format!("/sessionTimes/{}", Uuid::new_v4()),
            Some(json!({
                "startTime": "2024-01-01T00:00:00Z",
                "endTime": "2024-01-01T05:00:00Z"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Session time not found" }));

        let (_, listed) = send(&router, "GET", &format!("/sessionTimes/{}", USER), None).await;
        assert_eq!(listed, Value::Array(vec![created]));
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let store = Arc::new(InMemorySessionTimeRepository::new());
        let router = router_with(store.clone());

        let (_, created) = send(&router, "POST", "/sessionTimes", Some(ten_minutes(USER))).await;
        let uri = format!("/sessionTimes/{}", created["id"].as_str().unwrap());

        let (status, body) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Session time not found" }));

        let (_, listed) = send(&router, "GET", &format!("/sessionTimes/{}", USER), None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_not_deduplicated() {
        let store = Arc::new(InMemorySessionTimeRepository::new());
        let router = router_with(store.clone());

        let requests = (0..8).map(|_| {
            let router = router.clone();
            tokio::spawn(async move {
                send(&router, "POST", "/sessionTimes", Some(ten_minutes(USER))).await
            })
        });

        let mut ids = Vec::new();
        for handle in requests.collect::<Vec<_>>() {
            let (status, created) = handle.await.unwrap();
            assert_eq!(status, StatusCode::CREATED);
            ids.push(created["id"].as_str().unwrap().to_string());
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 8);
        assert_eq!(store.len().await, 8);
    }

    #[tokio::test]
    async fn test_store_failures_are_reported_generically() {
        let router = create_router(AppState {
            db_pool: None,
            session_times: Arc::new(UnavailableStore),
            experiencias: Arc::new(InMemoryExperienciaRepository::new()),
        });
        let record = format!("/sessionTimes/{}", Uuid::new_v4());
        let interval = json!({
            "startTime": "2024-01-01T00:00:00Z",
            "endTime": "2024-01-01T00:10:00Z"
        });

        let cases = [
            ("POST", "/sessionTimes".to_string(), Some(ten_minutes(USER)), "Failed to create session time"),
            ("GET", format!("/sessionTimes/{}", USER), None, "Failed to get session times"),
            ("PUT", record.clone(), Some(interval), "Failed to update session time"),
            ("DELETE", record, None, "Failed to delete session time"),
        ];

        for (method, uri, body, message) in cases {
            let (status, response) = send(&router, method, &uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
            assert_eq!(response, json!({ "error": message }));
        }
    }
}
