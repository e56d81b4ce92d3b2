//! Data export command for external analysis and backup.
//!
//! Fetches the full visit table and hands it to the export module in the
//! requested format.

use crate::db::atendimentos::Atendimentos;
use crate::libs::atendimento::AtendimentoFilter;
use crate::libs::export::{ExportFormat, Exporter};
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format for the exported data
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Custom output file path; a timestamped name is generated when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    msg_info!(Message::ExportingData(format!("{:?}", args.format)));

    let atendimentos = Atendimentos::new()?.fetch(&AtendimentoFilter::default())?;

    let exporter = Exporter::new(args.format, args.output);
    exporter.export(&atendimentos)?;

    Ok(())
}
