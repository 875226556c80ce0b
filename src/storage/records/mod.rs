//! Record store for the `professores` relation.

pub mod memory;
pub mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

use crate::domain::model::{NewProfessor, Professor, SalaryStats};
use crate::storage::error::StoreResult;
use async_trait::async_trait;

/// Storage contract consumed by the service layer.
///
/// Implementations perform no business validation. Deleting or updating an
/// id that does not exist is a successful no-op.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records, highest id first.
    async fn list_all(&self) -> StoreResult<Vec<Professor>>;

    /// Inserts a record and returns its generated id.
    async fn insert(&self, record: NewProfessor) -> StoreResult<i64>;

    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    /// Changes `salario` only; every other column is left untouched.
    async fn update_salary(&self, id: i64, salario: f64) -> StoreResult<()>;

    /// Records whose `nome` or `curso` contains `fragment` (case-sensitive), by id.
    async fn search_by_text(&self, fragment: &str) -> StoreResult<Vec<Professor>>;

    /// Records with `salario` in `[inicial, final]`, or `>= inicial` when `final` is absent.
    async fn filter_by_salary_range(
        &self,
        inicial: f64,
        final_: Option<f64>,
    ) -> StoreResult<Vec<Professor>>;

    async fn aggregate_stats(&self) -> StoreResult<SalaryStats>;

    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> StoreResult<()>;
}
