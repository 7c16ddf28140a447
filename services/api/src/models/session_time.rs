//! Session time model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recorded session interval for a user
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SessionTime {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Seconds between `start_time` and `end_time`, fixed at write time
    pub duration: f64,
}

/// Session time creation payload handed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewSessionTime {
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: f64,
}

impl NewSessionTime {
    /// Build a new record, deriving its duration from the interval
    pub fn new(user_id: Uuid, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            start_time,
            end_time,
            duration: duration_seconds(start_time, end_time),
        }
    }
}

/// Replacement interval for an existing record
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTimeUpdate {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: f64,
}

impl SessionTimeUpdate {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            duration: duration_seconds(start_time, end_time),
        }
    }
}

/// Request body for `POST /sessionTimes`
///
/// `user_id` stays a string so a malformed identifier is reported as such
/// rather than as an unreadable body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionTimeRequest {
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Request body for `PUT /sessionTimes/:id`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionTimeRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Seconds elapsed from `start` to `end`, with millisecond precision.
///
/// Negative when `end` precedes `start`; no ordering is enforced.
pub fn duration_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}
