pub mod error;
pub mod photos;
pub mod records;

pub use error::{StoreError, StoreResult};
pub use photos::PhotoStore;
pub use records::{MemoryRecordStore, PgRecordStore, RecordStore};
