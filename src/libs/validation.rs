//! Input validation and sanitization for everything that crosses a boundary.
//!
//! Every free-text field, date, time, and uploaded file passes through this
//! module before it can reach the database or the uploads directory. The
//! checks are synchronous and typed: a [`ValidationError`] names the field
//! and the reason, and nothing is persisted when one is returned.

use crate::libs::atendimento::{Atendimento, AtendimentoPatch, AtendimentoUpdate, Modalidade, NovoAtendimento, STATUS_VALUES};
use chrono::{Local, NaiveDate, NaiveTime};
use std::path::Path;
use thiserror::Error;

/// Maximum length for general text fields (empresa, nome, status).
pub const MAX_TEXT_LEN: usize = 255;
/// Maximum length for the free-form observations field.
pub const MAX_OBSERVACOES_LEN: usize = 500;
/// Maximum accepted PDF size.
pub const MAX_PDF_SIZE: usize = 10 * 1024 * 1024;
/// Maximum length of a sanitized file name before the timestamp prefix.
const MAX_FILENAME_LEN: usize = 100;

/// PDF elements that can trigger code execution in a viewer. Files
/// containing any of them are rejected outright.
const PDF_DISALLOWED: [&str; 4] = ["/JavaScript", "/JS", "/OpenAction", "/Launch"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field '{0}' is required")]
    Required(&'static str),
    #[error("invalid date '{0}', expected dd/mm/YYYY")]
    InvalidDate(String),
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("unknown modalidade '{0}'")]
    UnknownModalidade(String),
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
    #[error("file is not a PDF")]
    NotAPdf,
    #[error("PDF exceeds the {0} MiB limit")]
    PdfTooLarge(usize),
    #[error("PDF contains disallowed element '{0}'")]
    PdfDisallowedContent(&'static str),
    #[error("no fields to update")]
    EmptyUpdate,
}

/// Strips characters usable for HTML or SQL injection, collapses whitespace
/// runs, and truncates to `max_len` characters.
pub fn sanitize_input(input: &str, max_len: usize) -> String {
    let stripped: String = input.chars().filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&' | ';')).collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_len).collect::<String>().trim().to_string()
}

/// Sanitizes a required text field, rejecting values that end up empty.
fn sanitize_required(input: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = sanitize_input(input, MAX_TEXT_LEN);
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value)
}

/// Parses a boundary date in `dd/mm/YYYY`.
pub fn parse_data(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y").map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// Parses a boundary time in `HH:MM`.
pub fn parse_hora(input: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| ValidationError::InvalidTime(input.to_string()))
}

/// Parses a modalidade, rejecting anything outside the four known exams.
pub fn parse_modalidade(input: &str) -> Result<Modalidade, ValidationError> {
    input.trim().parse().map_err(|_| ValidationError::UnknownModalidade(input.to_string()))
}

/// Parses a status against the known vocabulary.
pub fn parse_status(input: &str) -> Result<String, ValidationError> {
    let value = sanitize_input(input, MAX_TEXT_LEN);
    if STATUS_VALUES.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(ValidationError::UnknownStatus(input.to_string()))
    }
}

/// Validates a raw creation payload into a typed record.
pub fn validate_novo(novo: &NovoAtendimento) -> Result<Atendimento, ValidationError> {
    let mut atendimento = Atendimento::new(
        &sanitize_required(&novo.empresa, "empresa")?,
        &sanitize_required(&novo.nome, "nome")?,
        parse_modalidade(&novo.modalidade)?,
        parse_data(&novo.data)?,
        parse_hora(&novo.hora)?,
    );
    if let Some(status) = &novo.status {
        atendimento.status = parse_status(status)?;
    }
    if let Some(obs) = &novo.observacoes {
        let obs = sanitize_input(obs, MAX_OBSERVACOES_LEN);
        if !obs.is_empty() {
            atendimento.observacoes = Some(obs);
        }
    }
    Ok(atendimento)
}

/// Validates a raw partial update into a typed patch.
pub fn validate_update(update: &AtendimentoUpdate) -> Result<AtendimentoPatch, ValidationError> {
    if update.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }
    let mut patch = AtendimentoPatch::default();
    if let Some(empresa) = &update.empresa {
        patch.empresa = Some(sanitize_required(empresa, "empresa")?);
    }
    if let Some(nome) = &update.nome {
        patch.nome = Some(sanitize_required(nome, "nome")?);
    }
    if let Some(modalidade) = &update.modalidade {
        patch.modalidade = Some(parse_modalidade(modalidade)?);
    }
    if let Some(data) = &update.data {
        patch.data = Some(parse_data(data)?);
    }
    if let Some(hora) = &update.hora {
        patch.hora = Some(parse_hora(hora)?);
    }
    if let Some(status) = &update.status {
        patch.status = Some(parse_status(status)?);
    }
    if let Some(obs) = &update.observacoes {
        patch.observacoes = Some(sanitize_input(obs, MAX_OBSERVACOES_LEN));
    }
    Ok(patch)
}

/// Validates an uploaded PDF before anything touches disk.
///
/// Checks the `%PDF-` magic, the size limit, and the absence of elements
/// that can execute code in a viewer.
pub fn validate_pdf(bytes: &[u8]) -> Result<(), ValidationError> {
    if !bytes.starts_with(b"%PDF-") {
        return Err(ValidationError::NotAPdf);
    }
    if bytes.len() > MAX_PDF_SIZE {
        return Err(ValidationError::PdfTooLarge(MAX_PDF_SIZE / (1024 * 1024)));
    }
    for pattern in PDF_DISALLOWED {
        if contains(bytes, pattern.as_bytes()) {
            return Err(ValidationError::PdfDisallowedContent(pattern));
        }
    }
    Ok(())
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Produces a storage-safe file name: the base name with every character
/// outside `[letters, digits, '.', '-', '_']` replaced by `_`, truncated,
/// and prefixed with a timestamp so repeated uploads never collide.
pub fn safe_filename(name: &str) -> String {
    let base = Path::new(name).file_name().and_then(|n| n.to_str()).unwrap_or("arquivo.pdf");
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .take(MAX_FILENAME_LEN)
        .collect();
    format!("{}_{}", Local::now().format("%Y%m%d_%H%M%S"), cleaned)
}
