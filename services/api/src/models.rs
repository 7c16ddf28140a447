//! API models for stored records and request payloads

pub mod experiencia;
pub mod session_time;

pub use experiencia::{
    CreateExperienciaRequest, Experiencia, ExperienciaUpdate, NewExperiencia,
    UpdateExperienciaRequest,
};
pub use session_time::{
    CreateSessionTimeRequest, NewSessionTime, SessionTime, SessionTimeUpdate,
    UpdateSessionTimeRequest,
};
