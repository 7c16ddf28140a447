//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::repositories::{
    ExperienciaRepository, InMemoryExperienciaRepository, InMemorySessionTimeRepository,
    PgExperienciaRepository, PgSessionTimeRepository, SessionTimeRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Present only for the PostgreSQL backend
    pub db_pool: Option<PgPool>,
    pub session_times: Arc<dyn SessionTimeRepository>,
    pub experiencias: Arc<dyn ExperienciaRepository>,
}

impl AppState {
    /// State backed by PostgreSQL through a shared pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            session_times: Arc::new(PgSessionTimeRepository::new(pool.clone())),
            experiencias: Arc::new(PgExperienciaRepository::new(pool.clone())),
            db_pool: Some(pool),
        }
    }

    /// State backed by process-local memory; contents are lost on exit
    pub fn in_memory() -> Self {
        Self {
            db_pool: None,
            session_times: Arc::new(InMemorySessionTimeRepository::new()),
            experiencias: Arc::new(InMemoryExperienciaRepository::new()),
        }
    }
}
