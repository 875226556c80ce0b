pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{ProfessorService, ServiceError};
pub use domain::model::{NewProfessor, Professor, SalaryStats};
pub use domain::upload::UploadValidator;
pub use storage::{MemoryRecordStore, PgRecordStore, PhotoStore, RecordStore};
