use crate::app::ProfessorService;
use crate::domain::model::SalaryInput;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProfessorService>,
}

impl AppState {
    pub fn new(service: ProfessorService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Error envelope used by every non-success response.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MsgResponse {
    pub msg: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Multipart form accepted by `POST /professores` (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreateProfessorForm {
    pub nome: String,
    pub curso: String,
    /// Decimal number, e.g. `"4500.50"`.
    pub salario: String,
    /// JPEG or PNG, at most 512 KiB.
    #[schema(value_type = String, format = Binary)]
    pub foto: Vec<u8>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateSalaryRequest {
    /// New salary, as a number or a numeric string.
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub salario: Option<SalaryInput>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
