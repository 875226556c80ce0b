use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the `professores` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Professor {
    pub id: i64,
    pub nome: String,
    pub curso: String,
    pub salario: f64,
    /// Server filesystem path of the uploaded photo.
    pub foto: String,
}

/// Fields of a record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfessor {
    pub nome: String,
    pub curso: String,
    pub salario: f64,
    pub foto: String,
}

impl NewProfessor {
    pub fn with_id(self, id: i64) -> Professor {
        Professor {
            id,
            nome: self.nome,
            curso: self.curso,
            salario: self.salario,
            foto: self.foto,
        }
    }
}

/// Aggregate statistics over `salario`.
///
/// `total`, `menor` and `maior` are `null` when the table is empty; `media`
/// is always rendered with two decimals (`"0.00"` for an empty table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalaryStats {
    pub num: i64,
    pub total: Option<f64>,
    pub menor: Option<f64>,
    pub maior: Option<f64>,
    /// Mean salary with two decimals, e.g. `"2000.00"`.
    pub media: String,
}

impl SalaryStats {
    pub fn from_aggregates(
        num: i64,
        total: Option<f64>,
        menor: Option<f64>,
        maior: Option<f64>,
        avg: Option<f64>,
    ) -> Self {
        Self {
            num,
            total,
            menor,
            maior,
            media: format!("{:.2}", avg.unwrap_or(0.0)),
        }
    }
}
