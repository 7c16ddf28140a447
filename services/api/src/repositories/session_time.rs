//! Session time repository for store operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{NewSessionTime, SessionTime, SessionTimeUpdate};

/// Data access operations for session times
#[async_trait]
pub trait SessionTimeRepository: Send + Sync {
    /// Persist a new record and return it with its assigned id
    async fn create(&self, new: &NewSessionTime) -> DatabaseResult<SessionTime>;

    /// All records owned by `user_id`, in store order
    async fn find_by_user(&self, user_id: Uuid) -> DatabaseResult<Vec<SessionTime>>;

    /// Replace the interval of a record; `None` when no record has `id`
    async fn update_by_id(
        &self,
        id: Uuid,
        update: &SessionTimeUpdate,
    ) -> DatabaseResult<Option<SessionTime>>;

    /// Remove a record; `false` when no record has `id`
    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed session time repository
#[derive(Clone)]
pub struct PgSessionTimeRepository {
    pool: PgPool,
}

impl PgSessionTimeRepository {
    /// Create a new session time repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionTimeRepository for PgSessionTimeRepository {
    async fn create(&self, new: &NewSessionTime) -> DatabaseResult<SessionTime> {
        debug!("Creating session time for user: {}", new.user_id);

        sqlx::query_as::<_, SessionTime>(
            r#"
            INSERT INTO session_times (user_id, start_time, end_time, duration)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, start_time, end_time, duration
            "#,
        )
        .bind(new.user_id)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(new.duration)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find_by_user(&self, user_id: Uuid) -> DatabaseResult<Vec<SessionTime>> {
        debug!("Finding session times for user: {}", user_id);

        sqlx::query_as::<_, SessionTime>(
            r#"
            SELECT id, user_id, start_time, end_time, duration
            FROM session_times
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        update: &SessionTimeUpdate,
    ) -> DatabaseResult<Option<SessionTime>> {
        debug!("Updating session time: {}", id);

        sqlx::query_as::<_, SessionTime>(
            r#"
            UPDATE session_times
            SET start_time = $2, end_time = $3, duration = $4
            WHERE id = $1
            RETURNING id, user_id, start_time, end_time, duration
            "#,
        )
        .bind(id)
        .bind(update.start_time)
        .bind(update.end_time)
        .bind(update.duration)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        debug!("Deleting session time: {}", id);

        let result = sqlx::query("DELETE FROM session_times WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory session time repository for development and testing
///
/// Records are kept in insertion order.
#[derive(Default)]
pub struct InMemorySessionTimeRepository {
    records: RwLock<Vec<SessionTime>>,
}

impl InMemorySessionTimeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl InMemorySessionTimeRepository {
    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Look up a single record by id
    pub async fn get(&self, id: Uuid) -> Option<SessionTime> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }
}

#[async_trait]
impl SessionTimeRepository for InMemorySessionTimeRepository {
    async fn create(&self, new: &NewSessionTime) -> DatabaseResult<SessionTime> {
        let record = SessionTime {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            start_time: new.start_time,
            end_time: new.end_time,
            duration: new.duration,
        };

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_user(&self, user_id: Uuid) -> DatabaseResult<Vec<SessionTime>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        update: &SessionTimeUpdate,
    ) -> DatabaseResult<Option<SessionTime>> {
        let mut records = self.records.write().await;

        Ok(records.iter_mut().find(|record| record.id == id).map(|record| {
            record.start_time = update.start_time;
            record.end_time = update.end_time;
            record.duration = update.duration;
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
