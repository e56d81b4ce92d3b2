//! Request handlers for the dashboard and the JSON API.
//!
//! Every mutating handler follows the same shape: validate and sanitize the
//! boundary input, touch storage, record the action in the audit trail, and
//! only then answer. Rejections are audited too, so the `security.log`
//! mirrors what the API actually did.

use crate::db::atendimentos::Atendimentos;
use crate::libs::atendimento::{Atendimento, AtendimentoUpdate, DocumentoKind, NovoAtendimento, Stats};
use crate::libs::audit::{AuditAction, AuditLog};
use crate::libs::validation::{parse_data, parse_modalidade, safe_filename, validate_novo, validate_pdf, validate_update};
use crate::web::error::{ApiError, ApiResult};
use anyhow::Context;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub atendimentos: Atendimentos,
    pub audit: AuditLog,
    pub uploads_dir: PathBuf,
}

/// Embedded single-page dashboard; all data comes from the JSON API.
pub async fn dashboard() -> Html<&'static str> {
    Html(include_str!("dashboard.html"))
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = state.atendimentos.check_connection().is_ok();
    Json(serde_json::json!({ "database": database }))
}

/// Raw listing filters as they arrive on the query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub data: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub empresa: Option<String>,
    pub nome: Option<String>,
    pub modalidade: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> ApiResult<crate::libs::atendimento::AtendimentoFilter> {
        let mut filter = crate::libs::atendimento::AtendimentoFilter::default();
        if let Some(data) = non_empty(self.data) {
            filter.data = Some(parse_data(&data)?);
        }
        if let Some(inicio) = non_empty(self.data_inicio) {
            filter.data_inicio = Some(parse_data(&inicio)?);
        }
        if let Some(fim) = non_empty(self.data_fim) {
            filter.data_fim = Some(parse_data(&fim)?);
        }
        if let Some(modalidade) = non_empty(self.modalidade) {
            filter.modalidade = Some(parse_modalidade(&modalidade)?);
        }
        filter.empresa = non_empty(self.empresa);
        filter.nome = non_empty(self.nome);
        Ok(filter)
    }
}

// Dashboard forms submit unused filters as empty strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn list_atendimentos(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<Json<Vec<Atendimento>>> {
    let filter = query.into_filter()?;
    let atendimentos = state.atendimentos.fetch(&filter)?;
    Ok(Json(atendimentos))
}

pub async fn create_atendimento(State(state): State<AppState>, Json(novo): Json<NovoAtendimento>) -> ApiResult<impl IntoResponse> {
    let atendimento = validate_novo(&novo)?;
    let id = state.atendimentos.insert(&atendimento)?;
    let stored = state
        .atendimentos
        .get_by_id(id)?
        .context("inserted atendimento missing")?;

    state
        .audit
        .record(AuditAction::AddAppointment, &format!("{} - {}", stored.nome, stored.empresa));

    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update_atendimento(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<AtendimentoUpdate>,
) -> ApiResult<Json<Atendimento>> {
    let patch = validate_update(&update)?;
    let affected = state.atendimentos.update(id, &patch)?;
    if affected == 0 {
        return Err(ApiError::NotFound(id));
    }
    let stored = state.atendimentos.get_by_id(id)?.ok_or(ApiError::NotFound(id))?;

    state.audit.record(AuditAction::UpdateAppointment, &format!("id {}", id));

    Ok(Json(stored))
}

pub async fn delete_atendimento(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<serde_json::Value>> {
    let affected = state.atendimentos.delete(id)?;
    if affected == 0 {
        return Err(ApiError::NotFound(id));
    }

    state.audit.record(AuditAction::DeleteAppointment, &format!("id {}", id));

    Ok(Json(serde_json::json!({ "deleted": id })))
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<Stats>> {
    let stats = state.atendimentos.stats()?;
    Ok(Json(stats))
}

#[derive(Debug, Serialize)]
pub struct UploadEntry {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub atendimento_id: Option<i64>,
}

/// Receives a PDF via multipart and stores it under `uploads/`.
///
/// Optional `atendimento_id` and `kind` fields link the stored file to a
/// visit record. Nothing touches disk until the PDF passes validation.
pub async fn upload_documento(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult<impl IntoResponse> {
    let mut atendimento_id: Option<i64> = None;
    let mut kind: Option<DocumentoKind> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "atendimento_id" => {
                let text = field.text().await?;
                let id = text
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ApiError::BadRequest(format!("atendimento_id inválido: '{}'", text)))?;
                atendimento_id = Some(id);
            }
            "kind" => {
                let text = field.text().await?;
                let parsed = DocumentoKind::from_str(text.trim())
                    .map_err(|_| ApiError::BadRequest(format!("kind inválido: '{}'", text)))?;
                kind = Some(parsed);
            }
            "file" => {
                let name = field.file_name().unwrap_or("arquivo.pdf").to_string();
                let bytes = field.bytes().await?;
                file = Some((name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (original_name, bytes) = file.ok_or_else(|| ApiError::BadRequest("campo 'file' ausente".to_string()))?;

    if let Err(e) = validate_pdf(&bytes) {
        state
            .audit
            .record(AuditAction::UploadRejected, &format!("{}: {}", original_name, e));
        return Err(e.into());
    }

    // Linking to a missing record must fail before the file lands on disk.
    if let Some(id) = atendimento_id {
        if state.atendimentos.get_by_id(id)?.is_none() {
            return Err(ApiError::NotFound(id));
        }
    }

    let filename = safe_filename(&original_name);
    let path = state.uploads_dir.join(&filename);
    if let Err(e) = fs::write(&path, &bytes) {
        state.audit.record(AuditAction::UploadError, &format!("{}: {}", filename, e));
        return Err(ApiError::Internal(e.into()));
    }

    if let (Some(id), Some(kind)) = (atendimento_id, kind) {
        state.atendimentos.set_documento(id, kind, &filename)?;
    }

    state.audit.record(AuditAction::UploadSuccess, &filename);

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            filename,
            atendimento_id,
        }),
    ))
}

/// Stored PDFs, newest first.
pub async fn list_uploads(State(state): State<AppState>) -> ApiResult<Json<Vec<UploadEntry>>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(&state.uploads_dir).context("reading uploads directory")? {
        let entry = entry.context("reading uploads entry")?;
        let meta = entry.metadata().context("reading upload metadata")?;
        if !meta.is_file() {
            continue;
        }
        entries.push(UploadEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            size: meta.len(),
        });
    }
    // Names carry a timestamp prefix, so lexicographic descending is newest first.
    entries.sort_by(|a, b| b.name.cmp(&a.name));
    Ok(Json(entries))
}

pub async fn download_documento(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult<impl IntoResponse> {
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ApiError::BadRequest("nome de arquivo inválido".to_string()));
    }

    let path = state.uploads_dir.join(&name);
    if !path.is_file() {
        return Err(ApiError::FileNotFound(name));
    }

    let bytes = fs::read(&path).context("reading stored PDF")?;

    state.audit.record(AuditAction::DownloadPdf, &name);

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", name)),
    ];
    Ok((headers, bytes))
}

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<usize>,
}

pub async fn audit_tail(State(state): State<AppState>, Query(query): Query<AuditQuery>) -> ApiResult<Json<Vec<String>>> {
    let entries = state.audit.tail(query.limit.unwrap_or(50))?;
    Ok(Json(entries))
}

pub async fn audit_clear(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    state.audit.clear()?;
    Ok(Json(serde_json::json!({ "cleared": true })))
}

pub async fn seed_demo(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let inserted = state.atendimentos.seed_demo()?;
    if inserted > 0 {
        state.audit.record(AuditAction::SeedDemoData, &format!("{} registros", inserted));
    }
    Ok(Json(serde_json::json!({ "inserted": inserted })))
}
