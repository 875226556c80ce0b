//! In-process record store.
//!
//! Mirrors the Postgres store's semantics (ordering, inclusive ranges,
//! case-sensitive substring search, never-reused ids) without a database.
//! Used by the integration tests and handy for local experiments.

use crate::domain::model::{NewProfessor, Professor, SalaryStats};
use crate::storage::error::StoreResult;
use crate::storage::records::RecordStore;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: Vec<Professor>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryRecordStore {
    table: RwLock<Table>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a record up by id.
    pub async fn get(&self, id: i64) -> Option<Professor> {
        let table = self.table.read().await;
        table.rows.iter().find(|p| p.id == id).cloned()
    }

    async fn filter<F>(&self, pred: F) -> Vec<Professor>
    where
        F: Fn(&Professor) -> bool,
    {
        let table = self.table.read().await;
        table.rows.iter().filter(|p| pred(p)).cloned().collect()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list_all(&self) -> StoreResult<Vec<Professor>> {
        let mut rows = self.filter(|_| true).await;
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn insert(&self, record: NewProfessor) -> StoreResult<i64> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(record.with_id(id));
        Ok(id)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut table = self.table.write().await;
        table.rows.retain(|p| p.id != id);
        Ok(())
    }

    async fn update_salary(&self, id: i64, salario: f64) -> StoreResult<()> {
        let mut table = self.table.write().await;
        if let Some(row) = table.rows.iter_mut().find(|p| p.id == id) {
            row.salario = salario;
        }
        Ok(())
    }

    async fn search_by_text(&self, fragment: &str) -> StoreResult<Vec<Professor>> {
        Ok(self
            .filter(|p| p.nome.contains(fragment) || p.curso.contains(fragment))
            .await)
    }

    async fn filter_by_salary_range(
        &self,
        inicial: f64,
        final_: Option<f64>,
    ) -> StoreResult<Vec<Professor>> {
        Ok(self
            .filter(|p| p.salario >= inicial && final_.map_or(true, |upper| p.salario <= upper))
            .await)
    }

    async fn aggregate_stats(&self) -> StoreResult<SalaryStats> {
        let table = self.table.read().await;
        let salaries: Vec<f64> = table.rows.iter().map(|p| p.salario).collect();
        if salaries.is_empty() {
            return Ok(SalaryStats::from_aggregates(0, None, None, None, None));
        }

        let num = salaries.len() as i64;
        let total: f64 = salaries.iter().sum();
        let menor = salaries.iter().copied().fold(f64::INFINITY, f64::min);
        let maior = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(SalaryStats::from_aggregates(
            num,
            Some(total),
            Some(menor),
            Some(maior),
            Some(total / num as f64),
        ))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
