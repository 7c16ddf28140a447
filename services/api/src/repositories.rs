//! Repositories for store operations
//!
//! Each collection has a repository trait with a PostgreSQL implementation
//! and an in-memory one. Handlers only see the trait objects.

pub mod experiencia;
pub mod session_time;

pub use experiencia::{
    ExperienciaRepository, InMemoryExperienciaRepository, PgExperienciaRepository,
};
pub use session_time::{
    InMemorySessionTimeRepository, PgSessionTimeRepository, SessionTimeRepository,
};
