//! Terminal listing of visit records.
//!
//! Prints the filtered visit table with the same columns and boundary
//! formatting the dashboard shows, or the aggregate summary with `--stats`.

use crate::db::atendimentos::Atendimentos;
use crate::libs::atendimento::AtendimentoFilter;
use crate::libs::messages::Message;
use crate::libs::validation::{parse_data, parse_modalidade};
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Exact visit date (dd/mm/YYYY)
    #[arg(long)]
    data: Option<String>,

    /// Inclusive range start (dd/mm/YYYY)
    #[arg(long)]
    inicio: Option<String>,

    /// Inclusive range end (dd/mm/YYYY)
    #[arg(long)]
    fim: Option<String>,

    /// Company name substring
    #[arg(short, long)]
    empresa: Option<String>,

    /// Patient name substring
    #[arg(short, long)]
    nome: Option<String>,

    /// Exam modality
    #[arg(short, long)]
    modalidade: Option<String>,

    /// Show the aggregate summary instead of the table
    #[arg(long)]
    stats: bool,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    if args.stats {
        let stats = Atendimentos::new()?.stats()?;
        msg_print!(Message::StatsHeader, true);
        View::stats(&stats)?;
        return Ok(());
    }

    let mut filter = AtendimentoFilter::default();
    if let Some(data) = &args.data {
        filter.data = Some(parse_data(data)?);
    }
    if let Some(inicio) = &args.inicio {
        filter.data_inicio = Some(parse_data(inicio)?);
    }
    if let Some(fim) = &args.fim {
        filter.data_fim = Some(parse_data(fim)?);
    }
    if let Some(modalidade) = &args.modalidade {
        filter.modalidade = Some(parse_modalidade(modalidade)?);
    }
    filter.empresa = args.empresa;
    filter.nome = args.nome;

    let atendimentos = Atendimentos::new()?.fetch(&filter)?;

    if atendimentos.is_empty() {
        msg_info!(Message::NoAtendimentosFound);
        return Ok(());
    }

    msg_print!(Message::AtendimentosHeader(atendimentos.len()), true);
    View::atendimentos(&atendimentos)?;

    Ok(())
}
