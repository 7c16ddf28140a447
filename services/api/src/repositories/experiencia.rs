//! Experiencia repository for store operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Experiencia, ExperienciaUpdate, NewExperiencia};

/// Data access operations for experiencias
#[async_trait]
pub trait ExperienciaRepository: Send + Sync {
    async fn create(&self, new: &NewExperiencia) -> DatabaseResult<Experiencia>;

    async fn list(&self) -> DatabaseResult<Vec<Experiencia>>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Experiencia>>;

    /// Replace the mutable fields; `None` when no record has `id`
    async fn update_by_id(
        &self,
        id: Uuid,
        update: &ExperienciaUpdate,
    ) -> DatabaseResult<Option<Experiencia>>;

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed experiencia repository
#[derive(Clone)]
pub struct PgExperienciaRepository {
    pool: PgPool,
}

impl PgExperienciaRepository {
    /// Create a new experiencia repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExperienciaRepository for PgExperienciaRepository {
    async fn create(&self, new: &NewExperiencia) -> DatabaseResult<Experiencia> {
        debug!("Creating experiencia for owner: {}", new.owner);

        sqlx::query_as::<_, Experiencia>(
            r#"
            INSERT INTO experiencias (owner, participants, description, tipo)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner, participants, description, tipo
            "#,
        )
        .bind(new.owner)
        .bind(&new.participants)
        .bind(&new.description)
        .bind(&new.tipo)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn list(&self) -> DatabaseResult<Vec<Experiencia>> {
        sqlx::query_as::<_, Experiencia>(
            "SELECT id, owner, participants, description, tipo FROM experiencias",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Experiencia>> {
        sqlx::query_as::<_, Experiencia>(
            r#"
            SELECT id, owner, participants, description, tipo
            FROM experiencias
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        update: &ExperienciaUpdate,
    ) -> DatabaseResult<Option<Experiencia>> {
        debug!("Updating experiencia: {}", id);

        sqlx::query_as::<_, Experiencia>(
            r#"
            UPDATE experiencias
            SET participants = $2, description = $3, tipo = $4
            WHERE id = $1
            RETURNING id, owner, participants, description, tipo
            "#,
        )
        .bind(id)
        .bind(&update.participants)
        .bind(&update.description)
        .bind(&update.tipo)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        debug!("Deleting experiencia: {}", id);

        let result = sqlx::query("DELETE FROM experiencias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory experiencia repository for development and testing
#[derive(Default)]
pub struct InMemoryExperienciaRepository {
    records: RwLock<Vec<Experiencia>>,
}

impl InMemoryExperienciaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExperienciaRepository for InMemoryExperienciaRepository {
    async fn create(&self, new: &NewExperiencia) -> DatabaseResult<Experiencia> {
        let record = Experiencia {
            id: Uuid::new_v4(),
            owner: new.owner,
            participants: new.participants.clone(),
            description: new.description.clone(),
            tipo: new.tipo.clone(),
        };

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> DatabaseResult<Vec<Experiencia>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Experiencia>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        update: &ExperienciaUpdate,
    ) -> DatabaseResult<Option<Experiencia>> {
        let mut records = self.records.write().await;

        Ok(records.iter_mut().find(|record| record.id == id).map(|record| {
            record.participants = update.participants.clone();
            record.description = update.description.clone();
            record.tipo = update.tipo.clone();
            record.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok(records.len() < before)
    }
}
