pub mod error;
pub mod professor_service;

pub use error::ServiceError;
pub use professor_service::{CreateProfessor, PhotoUpload, ProfessorService};
