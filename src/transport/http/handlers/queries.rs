//! Read-only query endpoints: text search, salary filters and totals.

use crate::domain::model::{parse_salary, Professor, SalaryStats};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, MsgResponse};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

fn salary_param(raw: &str) -> Result<f64, ApiError> {
    parse_salary(raw).map_err(ApiError::BadRequest)
}

#[utoipa::path(
    get,
    path = "/professores/pesq/{palavra}",
    params(("palavra" = String, Path, description = "Case-sensitive fragment of nome or curso")),
    responses(
        (status = 200, description = "Matching professores", body = [Professor]),
        (status = 400, description = "Storage failure", body = MsgResponse)
    )
)]
pub async fn search_handler(
    State(state): State<AppState>,
    palavra: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Professor>>, ApiError> {
    let Path(palavra) = palavra?;
    Ok(Json(state.service.search(&palavra).await?))
}

#[utoipa::path(
    get,
    path = "/professores/salario/{inicial}",
    params(("inicial" = f64, Path, description = "Lowest salary (inclusive)")),
    responses(
        (status = 200, description = "Professores earning at least `inicial`", body = [Professor]),
        (status = 400, description = "Invalid number or storage failure", body = MsgResponse)
    )
)]
pub async fn salary_at_least_handler(
    State(state): State<AppState>,
    inicial: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Professor>>, ApiError> {
    let Path(inicial) = inicial?;
    let inicial = salary_param(&inicial)?;
    Ok(Json(state.service.by_salary(inicial, None).await?))
}

#[utoipa::path(
    get,
    path = "/professores/salario/{inicial}/{final}",
    params(
        ("inicial" = f64, Path, description = "Lowest salary (inclusive)"),
        ("final" = f64, Path, description = "Highest salary (inclusive)")
    ),
    responses(
        (status = 200, description = "Professores with salary in [inicial, final]", body = [Professor]),
        (status = 400, description = "Invalid number or storage failure", body = MsgResponse)
    )
)]
pub async fn salary_between_handler(
    State(state): State<AppState>,
    bounds: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Vec<Professor>>, ApiError> {
    let Path((inicial, final_)) = bounds?;
    let inicial = salary_param(&inicial)?;
    let final_ = salary_param(&final_)?;
    Ok(Json(state.service.by_salary(inicial, Some(final_)).await?))
}

#[utoipa::path(
    get,
    path = "/professores/total",
    responses(
        (status = 200, description = "Count, sum, min, max and mean of salario", body = SalaryStats),
        (status = 400, description = "Storage failure", body = MsgResponse)
    )
)]
pub async fn totals_handler(State(state): State<AppState>) -> Result<Json<SalaryStats>, ApiError> {
    Ok(Json(state.service.totals().await?))
}
