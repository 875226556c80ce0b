//! PostgreSQL-backed record store.

use crate::domain::model::{NewProfessor, Professor, SalaryStats};
use crate::storage::error::StoreResult;
use crate::storage::records::RecordStore;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

const SELECT_COLUMNS: &str =
    "SELECT id, nome, curso, salario::float8 AS salario, foto FROM professores";

/// Record store over a `sqlx` connection pool.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Connects to `database_url` and makes sure the `professores` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS professores (
                id BIGSERIAL PRIMARY KEY,
                nome TEXT NOT NULL,
                curso TEXT NOT NULL,
                salario NUMERIC(12, 2) NOT NULL,
                foto TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch(&self, mut qb: QueryBuilder<'_, Postgres>) -> StoreResult<Vec<Professor>> {
        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_professor).collect()
    }
}

fn row_to_professor(row: &PgRow) -> StoreResult<Professor> {
    Ok(Professor {
        id: row.try_get("id")?,
        nome: row.try_get("nome")?,
        curso: row.try_get("curso")?,
        salario: row.try_get("salario")?,
        foto: row.try_get("foto")?,
    })
}

/// Builds a `LIKE` pattern matching `fragment` anywhere in the column.
///
/// `%`, `_` and `\` in the fragment are escaped so they match literally.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list_all(&self) -> StoreResult<Vec<Professor>> {
        let mut qb = QueryBuilder::new(SELECT_COLUMNS);
        qb.push(" ORDER BY id DESC");
        self.fetch(qb).await
    }

    async fn insert(&self, record: NewProfessor) -> StoreResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO professores (nome, curso, salario, foto)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&record.nome)
        .bind(&record.curso)
        .bind(record.salario)
        .bind(&record.foto)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM professores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_salary(&self, id: i64, salario: f64) -> StoreResult<()> {
        sqlx::query("UPDATE professores SET salario = $1 WHERE id = $2")
            .bind(salario)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn search_by_text(&self, fragment: &str) -> StoreResult<Vec<Professor>> {
        let pattern = contains_pattern(fragment);
        let mut qb = QueryBuilder::new(SELECT_COLUMNS);
        qb.push(" WHERE nome LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR curso LIKE ");
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\' ORDER BY id");
        self.fetch(qb).await
    }

    async fn filter_by_salary_range(
        &self,
        inicial: f64,
        final_: Option<f64>,
    ) -> StoreResult<Vec<Professor>> {
        let mut qb = QueryBuilder::new(SELECT_COLUMNS);
        qb.push(" WHERE salario >= ");
        qb.push_bind(inicial);
        if let Some(upper) = final_ {
            qb.push(" AND salario <= ");
            qb.push_bind(upper);
        }
        qb.push(" ORDER BY id");
        self.fetch(qb).await
    }

    async fn aggregate_stats(&self) -> StoreResult<SalaryStats> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS num,
                    SUM(salario)::float8 AS total,
                    MIN(salario)::float8 AS menor,
                    MAX(salario)::float8 AS maior,
                    AVG(salario)::float8 AS media
             FROM professores",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(SalaryStats::from_aggregates(
            row.try_get("num")?,
            row.try_get("total")?,
            row.try_get("menor")?,
            row.try_get("maior")?,
            row.try_get("media")?,
        ))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
