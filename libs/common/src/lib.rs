//! Common library for the session-time services
//!
//! This crate provides shared infrastructure used by the services: database
//! configuration and connectivity, plus the storage error type.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, close_pool, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::default();
//!     let pool = init_pool(&config).await?;
//!     println!("Database health check: {}", health_check(&pool).await);
//!     close_pool(&pool).await;
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
