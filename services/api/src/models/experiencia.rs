//! Experiencia model and related payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A shared experience owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Experiencia {
    pub id: Uuid,
    pub owner: Uuid,
    pub participants: Vec<Uuid>,
    pub description: String,
    pub tipo: String,
}

/// New experiencia creation payload handed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewExperiencia {
    pub owner: Uuid,
    pub participants: Vec<Uuid>,
    pub description: String,
    pub tipo: String,
}

/// Replacement fields for an existing experiencia; the owner is fixed
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienciaUpdate {
    pub participants: Vec<Uuid>,
    pub description: String,
    pub tipo: String,
}

/// Request body for `POST /experiencias`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExperienciaRequest {
    pub owner: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tipo: String,
}

/// Request body for `PUT /experiencias/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExperienciaRequest {
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tipo: String,
}
