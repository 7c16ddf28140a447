//! Experiencia handlers

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
        CreateExperienciaRequest, Experiencia, ExperienciaUpdate, NewExperiencia,
        UpdateExperienciaRequest,
    },
    routes::path_identifier,
    state::AppState,
    validation::{parse_identifier, parse_identifiers},
};

fn path_experiencia_id(path: Result<Path<String>, PathRejection>) -> ApiResult<Uuid> {
    path_identifier(path, "experiencia id", "Invalid experiencia ID")
}

fn parse_participants(raw: &[String]) -> ApiResult<Vec<Uuid>> {
    parse_identifiers(raw).map_err(|e| {
        warn!("Rejected participants: {}", e);
        ApiError::InvalidArgument("Invalid participants".to_string())
    })
}

fn not_found() -> ApiError {
    ApiError::NotFound("Experiencia not found".to_string())
}

pub async fn create_experiencia(
    State(state): State<AppState>,
    payload: Result<Json<CreateExperienciaRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Experiencia>)> {
    let Json(payload) = payload?;
    let owner = parse_identifier(&payload.owner).map_err(|e| {
        warn!("Rejected owner {:?}: {}", payload.owner, e);
        ApiError::InvalidArgument("Invalid owner".to_string())
    })?;

    let new = NewExperiencia {
        owner,
        participants: parse_participants(&payload.participants)?,
        description: payload.description,
        tipo: payload.tipo,
    };

    let created = state.experiencias.create(&new).await.map_err(|e| {
        error!("Failed to create experiencia: {}", e);
        ApiError::Unexpected("Failed to create experiencia".to_string())
    })?;

    info!("Created experiencia {} for owner {}", created.id, owner);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_experiencias(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Experiencia>>> {
    let experiencias = state.experiencias.list().await.map_err(|e| {
        error!("Failed to get experiencias: {}", e);
        ApiError::Unexpected("Failed to get experiencias".to_string())
    })?;

    Ok(Json(experiencias))
}

pub async fn get_experiencia(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Experiencia>> {
    let id = path_experiencia_id(path)?;

    let experiencia = state
        .experiencias
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get experiencia: {}", e);
            ApiError::Unexpected("Failed to get experiencia".to_string())
        })?
        .ok_or_else(not_found)?;

    Ok(Json(experiencia))
}

/// Replace participants, description and tipo; the owner never changes
pub async fn update_experiencia(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateExperienciaRequest>, JsonRejection>,
) -> ApiResult<Json<Experiencia>> {
    let id = path_experiencia_id(path)?;
    let Json(payload) = payload?;

    let update = ExperienciaUpdate {
        participants: parse_participants(&payload.participants)?,
        description: payload.description,
        tipo: payload.tipo,
    };

    let updated = state
        .experiencias
        .update_by_id(id, &update)
        .await
        .map_err(|e| {
            error!("Failed to update experiencia: {}", e);
            ApiError::Unexpected("Failed to update experiencia".to_string())
        })?
        .ok_or_else(not_found)?;

    info!("Updated experiencia {}", id);
    Ok(Json(updated))
}

pub async fn delete_experiencia(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = path_experiencia_id(path)?;

    let deleted = state.experiencias.delete_by_id(id).await.map_err(|e| {
        error!("Failed to delete experiencia: {}", e);
        ApiError::Unexpected("Failed to delete experiencia".to_string())
    })?;

    if deleted {
        info!("Deleted experiencia {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
