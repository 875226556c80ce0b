//! CRUD endpoints under `/professores`.

use crate::app::{CreateProfessor, PhotoUpload};
use crate::domain::model::Professor;
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{
    AppState, CreateProfessorForm, CreatedResponse, MsgResponse, UpdateSalaryRequest,
};
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::{header, StatusCode};
use axum::{Form, Json};

pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("id inválido: '{}'", raw)))
}

/// Reads the PUT body as a url-encoded form when declared so, as JSON otherwise.
async fn read_update_body(req: Request) -> Result<UpdateSalaryRequest, ApiError> {
    let is_form = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
        .unwrap_or(false);

    if is_form {
        let Form(body) = Form::<UpdateSalaryRequest>::from_request(req, &()).await?;
        Ok(body)
    } else {
        let Json(body) = Json::<UpdateSalaryRequest>::from_request(req, &()).await?;
        Ok(body)
    }
}

#[utoipa::path(
    get,
    path = "/professores",
    responses(
        (status = 200, description = "All professores, highest id first", body = [Professor]),
        (status = 400, description = "Storage failure", body = MsgResponse)
    )
)]
pub async fn list_professores_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Professor>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

#[utoipa::path(
    post,
    path = "/professores",
    request_body(content = CreateProfessorForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Professor created", body = CreatedResponse),
        (status = 400, description = "Missing field, invalid photo or storage failure", body = MsgResponse)
    )
)]
pub async fn create_professor_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let mut multipart = multipart?;
    let mut req = CreateProfessor::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "nome" => req.nome = Some(field.text().await?),
            "curso" => req.curso = Some(field.text().await?),
            "salario" => req.salario = Some(field.text().await?),
            "foto" if req.foto.is_none() => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                req.foto = Some(PhotoUpload {
                    original_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let id = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[utoipa::path(
    delete,
    path = "/professores/{id}",
    params(("id" = i64, Path, description = "Professor id")),
    responses(
        (status = 200, description = "Deleted (also when the id does not exist)"),
        (status = 400, description = "Invalid id or storage failure", body = MsgResponse)
    )
)]
pub async fn delete_professor_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(raw) = id?;
    let id = parse_id(&raw)?;
    state.service.delete(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    put,
    path = "/professores/{id}",
    params(("id" = i64, Path, description = "Professor id")),
    request_body(
        content = UpdateSalaryRequest,
        description = "JSON, or `application/x-www-form-urlencoded` with the same field",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Salary updated (also when the id does not exist)"),
        (status = 400, description = "Invalid id, missing salario or storage failure", body = MsgResponse)
    )
)]
pub async fn update_salary_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    request: Request,
) -> Result<StatusCode, ApiError> {
    let Path(raw) = id?;
    let id = parse_id(&raw)?;
    let body = read_update_body(request).await?;

    let salario = body
        .salario
        .ok_or_else(|| ApiError::BadRequest("Informe o salario".to_string()))?
        .into_value()
        .map_err(ApiError::BadRequest)?;

    state.service.update_salary(id, salario).await?;
    Ok(StatusCode::OK)
}
