//! Export of the visit table for external analysis and backup.
//!
//! Supports CSV (spreadsheet interchange), JSON (programmatic processing,
//! pretty-printed), and native Excel output. Rows are exported in listing
//! order with boundary formatting applied, so a CSV opened in a spreadsheet
//! shows the same `dd/mm/YYYY` dates as the dashboard.
//!
//! ```rust,no_run
//! use atende::libs::export::{ExportFormat, Exporter};
//!
//! let exporter = Exporter::new(ExportFormat::Csv, None);
//! // exporter.export(&atendimentos)?;
//! ```

use crate::libs::atendimento::Atendimento;
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Supported export output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values for universal compatibility.
    Csv,
    /// Pretty-printed JSON for programmatic processing.
    Json,
    /// Excel workbook with a formatted header row.
    Excel,
}

/// Flat, export-friendly projection of a visit record.
///
/// Every field is a string so the three formats present identical values.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportAtendimento {
    pub id: i64,
    pub empresa: String,
    pub nome: String,
    pub modalidade: String,
    /// Visit date in `dd/mm/YYYY`.
    pub data: String,
    /// Visit time in `HH:MM`.
    pub hora: String,
    pub status: String,
    pub laudo_pdf: String,
    pub avaliacao_pdf: String,
    pub observacoes: String,
}

impl From<&Atendimento> for ExportAtendimento {
    fn from(at: &Atendimento) -> Self {
        Self {
            id: at.id.unwrap_or(0),
            empresa: at.empresa.clone(),
            nome: at.nome.clone(),
            modalidade: at.modalidade.to_string(),
            data: at.data.format("%d/%m/%Y").to_string(),
            hora: at.hora.format("%H:%M").to_string(),
            status: at.status.clone(),
            laudo_pdf: at.laudo_pdf.clone().unwrap_or_default(),
            avaliacao_pdf: at.avaliacao_pdf.clone().unwrap_or_default(),
            observacoes: at.observacoes.clone().unwrap_or_default(),
        }
    }
}

const EXPORT_HEADERS: [&str; 10] = [
    "ID",
    "Empresa",
    "Nome",
    "Modalidade",
    "Data",
    "Hora",
    "Status",
    "Laudo",
    "Avaliação",
    "Observações",
];

/// Export handler holding the chosen format and output destination.
pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter; without an explicit path a timestamped default
    /// such as `atende_export_20250904_090012.csv` is generated.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("atende_export_{}", Local::now().format("%Y%m%d_%H%M%S"));

        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        };

        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, extension)));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    /// Writes the records to the output file in the configured format.
    pub fn export(&self, atendimentos: &[Atendimento]) -> Result<()> {
        if atendimentos.is_empty() {
            msg_info!(Message::NoDataToExport);
            return Ok(());
        }

        let rows: Vec<ExportAtendimento> = atendimentos.iter().map(ExportAtendimento::from).collect();

        match self.format {
            ExportFormat::Csv => self.export_csv(&rows)?,
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(&rows)?;
                File::create(&self.output_path)?.write_all(json.as_bytes())?;
            }
            ExportFormat::Excel => self.export_excel(&rows)?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn export_csv(&self, rows: &[ExportAtendimento]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(EXPORT_HEADERS)?;

        for row in rows {
            wtr.write_record(&[
                row.id.to_string(),
                row.empresa.clone(),
                row.nome.clone(),
                row.modalidade.clone(),
                row.data.clone(),
                row.hora.clone(),
                row.status.clone(),
                row.laudo_pdf.clone(),
                row.avaliacao_pdf.clone(),
                row.observacoes.clone(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_excel(&self, rows: &[ExportAtendimento]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        for (col, header) in EXPORT_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, r) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_number(row, 0, r.id as f64)?;
            worksheet.write_string(row, 1, &r.empresa)?;
            worksheet.write_string(row, 2, &r.nome)?;
            worksheet.write_string(row, 3, &r.modalidade)?;
            worksheet.write_string(row, 4, &r.data)?;
            worksheet.write_string(row, 5, &r.hora)?;
            worksheet.write_string(row, 6, &r.status)?;
            worksheet.write_string(row, 7, &r.laudo_pdf)?;
            worksheet.write_string(row, 8, &r.avaliacao_pdf)?;
            worksheet.write_string(row, 9, &r.observacoes)?;
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }
}
