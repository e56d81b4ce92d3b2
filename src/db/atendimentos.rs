//! Repository for the visit table.
//!
//! All reads and writes go through a shared connection handle so the same
//! repository instance can serve the CLI and every HTTP handler. Dates are
//! stored ISO (`YYYY-MM-DD`) and times as `HH:MM`; boundary formatting to
//! `dd/mm/YYYY` happens in the view and export layers.

use super::db::Db;
use crate::libs::atendimento::{Atendimento, AtendimentoFilter, AtendimentoPatch, DocumentoKind, Modalidade, Stats};
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::str::FromStr;
use std::sync::Arc;

const SELECT_FIELDS: &str = "SELECT id, empresa, nome, modalidade, data, hora, laudo_pdf, avaliacao_pdf, status, observacoes, data_criacao, data_atualizacao FROM atendimentos";
const INSERT_ATENDIMENTO: &str =
    "INSERT INTO atendimentos (empresa, nome, modalidade, data, hora, status, observacoes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const DELETE_ATENDIMENTO: &str = "DELETE FROM atendimentos WHERE id = ?1";
// Newest visits first; id breaks ties between visits at the same moment.
const ORDER_BY_LISTING: &str = "ORDER BY data DESC, hora DESC, id DESC";

#[derive(Clone)]
pub struct Atendimentos {
    conn: Arc<Mutex<Connection>>,
}

impl Atendimentos {
    /// Opens the application database and wraps it in a shareable handle.
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(db.conn)),
        })
    }

    /// Builds a repository over an already opened connection.
    pub fn with_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    /// Inserts a visit and returns its assigned id.
    pub fn insert(&self, at: &Atendimento) -> Result<i64> {
        let conn = self.conn.lock();
        conn.execute(
            INSERT_ATENDIMENTO,
            params![
                at.empresa,
                at.nome,
                at.modalidade.to_string(),
                at.data.format("%Y-%m-%d").to_string(),
                at.hora.format("%H:%M").to_string(),
                at.status,
                at.observacoes,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Applies the non-empty fields of a patch to an existing visit.
    ///
    /// Returns the number of affected rows, so `0` means the id does not
    /// exist. The `data_atualizacao` column is touched on every update.
    pub fn update(&self, id: i64, patch: &AtendimentoPatch) -> Result<usize> {
        let mut sets: Vec<String> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(empresa) = &patch.empresa {
            sets.push(format!("empresa = ?{}", values.len() + 1));
            values.push(Box::new(empresa.clone()));
        }
        if let Some(nome) = &patch.nome {
            sets.push(format!("nome = ?{}", values.len() + 1));
            values.push(Box::new(nome.clone()));
        }
        if let Some(modalidade) = &patch.modalidade {
            sets.push(format!("modalidade = ?{}", values.len() + 1));
            values.push(Box::new(modalidade.to_string()));
        }
        if let Some(data) = &patch.data {
            sets.push(format!("data = ?{}", values.len() + 1));
            values.push(Box::new(data.format("%Y-%m-%d").to_string()));
        }
        if let Some(hora) = &patch.hora {
            sets.push(format!("hora = ?{}", values.len() + 1));
            values.push(Box::new(hora.format("%H:%M").to_string()));
        }
        if let Some(status) = &patch.status {
            sets.push(format!("status = ?{}", values.len() + 1));
            values.push(Box::new(status.clone()));
        }
        if let Some(observacoes) = &patch.observacoes {
            sets.push(format!("observacoes = ?{}", values.len() + 1));
            values.push(Box::new(observacoes.clone()));
        }

        if sets.is_empty() {
            return Ok(0);
        }

        sets.push("data_atualizacao = CURRENT_TIMESTAMP".to_string());
        let sql = format!("UPDATE atendimentos SET {} WHERE id = ?{}", sets.join(", "), values.len() + 1);
        values.push(Box::new(id));

        let conn = self.conn.lock();
        let affected = conn.execute(&sql, params_from_iter(values.iter()))?;
        Ok(affected)
    }

    /// Deletes a visit, returning the number of affected rows.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let conn = self.conn.lock();
        let affected = conn.execute(DELETE_ATENDIMENTO, params![id])?;
        Ok(affected)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Atendimento>> {
        let conn = self.conn.lock();
        let at = conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_FIELDS), params![id], Self::map_row)
            .optional()?;
        Ok(at)
    }

    /// Lists visits matching the filter, newest first.
    pub fn fetch(&self, filter: &AtendimentoFilter) -> Result<Vec<Atendimento>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(data) = &filter.data {
            clauses.push(format!("data = ?{}", values.len() + 1));
            values.push(Box::new(data.format("%Y-%m-%d").to_string()));
        }
        if let Some(inicio) = &filter.data_inicio {
            clauses.push(format!("data >= ?{}", values.len() + 1));
            values.push(Box::new(inicio.format("%Y-%m-%d").to_string()));
        }
        if let Some(fim) = &filter.data_fim {
            clauses.push(format!("data <= ?{}", values.len() + 1));
            values.push(Box::new(fim.format("%Y-%m-%d").to_string()));
        }
        if let Some(empresa) = &filter.empresa {
            clauses.push(format!("empresa LIKE ?{}", values.len() + 1));
            values.push(Box::new(format!("%{}%", empresa)));
        }
        if let Some(nome) = &filter.nome {
            clauses.push(format!("nome LIKE ?{}", values.len() + 1));
            values.push(Box::new(format!("%{}%", nome)));
        }
        if let Some(modalidade) = &filter.modalidade {
            clauses.push(format!("modalidade = ?{}", values.len() + 1));
            values.push(Box::new(modalidade.to_string()));
        }

        let sql = if clauses.is_empty() {
            format!("{} {}", SELECT_FIELDS, ORDER_BY_LISTING)
        } else {
            format!("{} WHERE {} {}", SELECT_FIELDS, clauses.join(" AND "), ORDER_BY_LISTING)
        };

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let iter = stmt.query_map(params_from_iter(values.iter()), Self::map_row)?;

        let mut atendimentos = Vec::new();
        for at in iter {
            atendimentos.push(at?);
        }
        Ok(atendimentos)
    }

    /// Records a stored document filename on a visit.
    pub fn set_documento(&self, id: i64, kind: DocumentoKind, filename: &str) -> Result<usize> {
        let sql = format!(
            "UPDATE atendimentos SET {} = ?1, data_atualizacao = CURRENT_TIMESTAMP WHERE id = ?2",
            kind.column()
        );
        let conn = self.conn.lock();
        let affected = conn.execute(&sql, params![filename, id])?;
        Ok(affected)
    }

    /// Aggregates the dashboard statistics in a single pass over the table.
    pub fn stats(&self) -> Result<Stats> {
        let conn = self.conn.lock();

        let (total_atendimentos, total_empresas, laudos_enviados, avaliacoes_enviadas) = conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT empresa), COUNT(laudo_pdf), COUNT(avaliacao_pdf) FROM atendimentos",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

        let mut stmt = conn.prepare("SELECT modalidade, COUNT(*) FROM atendimentos GROUP BY modalidade ORDER BY COUNT(*) DESC")?;
        let por_modalidade = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare("SELECT data, COUNT(*) FROM atendimentos GROUP BY data ORDER BY data")?;
        let por_data = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Stats {
            total_atendimentos,
            total_empresas,
            laudos_enviados,
            avaliacoes_enviadas,
            por_modalidade,
            por_data,
        })
    }

    /// Lightweight connectivity probe used by the health endpoint.
    pub fn check_connection(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    /// Populates an empty table with demonstration visits.
    ///
    /// Does nothing when the table already holds data, so repeated seeding
    /// never duplicates records. Returns the number of inserted rows.
    pub fn seed_demo(&self) -> Result<usize> {
        {
            let conn = self.conn.lock();
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM atendimentos", [], |row| row.get(0))?;
            if count > 0 {
                return Ok(0);
            }
        }

        let fixtures = demo_fixtures();
        for at in &fixtures {
            self.insert(at)?;
        }
        Ok(fixtures.len())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Atendimento> {
        let modalidade_str: String = row.get(3)?;
        let data_str: String = row.get(4)?;
        let hora_str: String = row.get(5)?;

        let modalidade = Modalidade::from_str(&modalidade_str)
            .map_err(|_| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, format!("unknown modalidade: {}", modalidade_str).into()))?;
        let data = NaiveDate::parse_from_str(&data_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
        let hora = NaiveTime::parse_from_str(&hora_str, "%H:%M")
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

        Ok(Atendimento {
            id: row.get(0)?,
            empresa: row.get(1)?,
            nome: row.get(2)?,
            modalidade,
            data,
            hora,
            laudo_pdf: row.get(6)?,
            avaliacao_pdf: row.get(7)?,
            status: row.get(8)?,
            observacoes: row.get(9)?,
            data_criacao: row.get(10)?,
            data_atualizacao: row.get(11)?,
        })
    }
}

fn demo_fixtures() -> Vec<Atendimento> {
    let entries = [
        ("Alpha Ltda", "Maria Silva", Modalidade::Admissional, (2025, 9, 4), (9, 0)),
        ("Beta Corp", "João Souza", Modalidade::Periodico, (2024, 8, 15), (10, 30)),
        ("Alpha Ltda", "Carla Dias", Modalidade::Demissional, (2023, 3, 21), (14, 0)),
        ("Gamma SA", "Pedro Lima", Modalidade::Retorno, (2022, 12, 10), (11, 15)),
    ];

    entries
        .iter()
        .filter_map(|(empresa, nome, modalidade, (y, m, d), (h, min))| {
            let data = NaiveDate::from_ymd_opt(*y, *m, *d)?;
            let hora = NaiveTime::from_hms_opt(*h, *min, 0)?;
            let mut at = Atendimento::new(empresa, nome, *modalidade, data, hora);
            at.status = "Agendado".to_string();
            at.observacoes = Some(format!("Visita de demonstração ({})", modalidade));
            Some(at)
        })
        .collect()
}
