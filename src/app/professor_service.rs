//! The professor service.
//!
//! Sits between the HTTP handlers and the two storage collaborators:
//! - the `RecordStore` holding the `professores` rows,
//! - the `PhotoStore` holding uploaded photos.
//!
//! Every operation except `create` is a straight pass-through. `create` runs
//! the upload sequence: check required fields, store the photo, validate it
//! (deleting it again on rejection), then insert the row.

use crate::app::error::ServiceError;
use crate::domain::model::{parse_salary, NewProfessor, Professor, SalaryStats};
use crate::domain::upload::{UploadValidator, Verdict};
use crate::storage::{PhotoStore, RecordStore};
use std::sync::Arc;

pub const MISSING_FIELDS_MSG: &str = "Informe nome, curso, salario e foto do professor";

/// A file part received with a create request.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub original_name: String,
    /// Declared `Content-Type` of the part, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Raw create-request fields; anything may be absent.
#[derive(Debug, Clone, Default)]
pub struct CreateProfessor {
    pub nome: Option<String>,
    pub curso: Option<String>,
    pub salario: Option<String>,
    pub foto: Option<PhotoUpload>,
}

pub struct ProfessorService {
    records: Arc<dyn RecordStore>,
    photos: PhotoStore,
    validator: UploadValidator,
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}

impl ProfessorService {
    pub fn new(records: Arc<dyn RecordStore>, photos: PhotoStore, validator: UploadValidator) -> Self {
        Self {
            records,
            photos,
            validator,
        }
    }

    pub fn records(&self) -> &Arc<dyn RecordStore> {
        &self.records
    }

    pub async fn list(&self) -> Result<Vec<Professor>, ServiceError> {
        Ok(self.records.list_all().await?)
    }

    /// Stores the photo, validates it and inserts the record. Returns the new id.
    ///
    /// A request missing any field never touches the disk. A photo rejected by
    /// the validator is deleted before the error is returned. A failed insert
    /// leaves the (valid) photo in place.
    pub async fn create(&self, req: CreateProfessor) -> Result<i64, ServiceError> {
        let (nome, curso, salario, foto) = match (
            present(req.nome),
            present(req.curso),
            present(req.salario),
            req.foto,
        ) {
            (Some(n), Some(c), Some(s), Some(f)) if !f.original_name.is_empty() => (n, c, s, f),
            _ => return Err(ServiceError::validation(MISSING_FIELDS_MSG)),
        };
        let salario = parse_salary(&salario).map_err(ServiceError::Validation)?;

        let path = self.photos.store(&foto.bytes, &foto.original_name).await?;
        let size = foto.bytes.len() as u64;
        tracing::info!(
            original_name = %foto.original_name,
            stored_path = %path,
            mime_type = foto.content_type.as_deref().unwrap_or("-"),
            size,
            "photo stored"
        );

        if let Verdict::Rejected(reason) = self.validator.check(foto.content_type.as_deref(), size) {
            tracing::warn!(stored_path = %path, size, "photo rejected: {}", reason);
            if let Err(e) = self.photos.delete(&path).await {
                tracing::error!(stored_path = %path, "failed to delete rejected photo: {}", e);
            }
            return Err(ServiceError::Validation(reason));
        }

        let id = self
            .records
            .insert(NewProfessor {
                nome,
                curso,
                salario,
                foto: path,
            })
            .await?;
        tracing::info!(id, "professor created");
        Ok(id)
    }

    /// Removes the row. The photo file is left on disk.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        Ok(self.records.delete_by_id(id).await?)
    }

    pub async fn update_salary(&self, id: i64, salario: f64) -> Result<(), ServiceError> {
        Ok(self.records.update_salary(id, salario).await?)
    }

    pub async fn search(&self, palavra: &str) -> Result<Vec<Professor>, ServiceError> {
        Ok(self.records.search_by_text(palavra).await?)
    }

    pub async fn by_salary(
        &self,
        inicial: f64,
        final_: Option<f64>,
    ) -> Result<Vec<Professor>, ServiceError> {
        Ok(self.records.filter_by_salary_range(inicial, final_).await?)
    }

    pub async fn totals(&self) -> Result<SalaryStats, ServiceError> {
        Ok(self.records.aggregate_stats().await?)
    }
}
