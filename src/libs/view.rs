use super::atendimento::{Atendimento, Stats};
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn atendimentos(atendimentos: &[Atendimento]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "EMPRESA", "NOME", "MODALIDADE", "DATA", "HORA", "STATUS", "LAUDO", "AVALIAÇÃO"]);
        for at in atendimentos {
            table.add_row(row![
                at.id.unwrap_or(0),
                at.empresa,
                at.nome,
                at.modalidade,
                at.data.format("%d/%m/%Y"),
                at.hora.format("%H:%M"),
                at.status,
                at.laudo_pdf.as_deref().unwrap_or("-"),
                at.avaliacao_pdf.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn stats(stats: &Stats) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["Total atendimentos", stats.total_atendimentos]);
        table.add_row(row!["Empresas", stats.total_empresas]);
        table.add_row(row!["Laudos enviados", stats.laudos_enviados]);
        table.add_row(row!["Avaliações enviadas", stats.avaliacoes_enviadas]);
        for (modalidade, count) in &stats.por_modalidade {
            table.add_row(row![format!("  {}", modalidade), count]);
        }
        table.printstd();

        Ok(())
    }

    pub fn migration_history(history: &[(u32, String, String)]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["VERSION", "NAME", "APPLIED AT"]);
        for (version, name, applied_at) in history {
            table.add_row(row![version, name, applied_at]);
        }
        table.printstd();

        Ok(())
    }
}
