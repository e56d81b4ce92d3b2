//! Domain types for clinical visit records.
//!
//! An [`Atendimento`] is a single occupational-health visit: which company
//! sent the patient, who the patient is, the exam modality, when it takes
//! place, and which PDF reports have been attached. The input and update
//! shapes ([`NovoAtendimento`], [`AtendimentoUpdate`]) carry raw boundary
//! strings that only become typed values after passing through
//! `libs::validation`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allowed status values for a visit. The first entry is the default for
/// newly created records.
pub const STATUS_VALUES: [&str; 4] = ["Pendente", "Agendado", "Concluído", "Cancelado"];

/// Exam modality of a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modalidade {
    Admissional,
    #[serde(rename = "Periódico")]
    Periodico,
    Demissional,
    Retorno,
}

impl fmt::Display for Modalidade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modalidade::Admissional => "Admissional",
            Modalidade::Periodico => "Periódico",
            Modalidade::Demissional => "Demissional",
            Modalidade::Retorno => "Retorno",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Modalidade {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admissional" => Ok(Modalidade::Admissional),
            "Periódico" | "Periodico" => Ok(Modalidade::Periodico),
            "Demissional" => Ok(Modalidade::Demissional),
            "Retorno" => Ok(Modalidade::Retorno),
            _ => Err(()),
        }
    }
}

/// Which of the two report slots an uploaded PDF belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentoKind {
    Laudo,
    Avaliacao,
}

impl DocumentoKind {
    /// Column name in the `atendimentos` table.
    pub fn column(&self) -> &'static str {
        match self {
            DocumentoKind::Laudo => "laudo_pdf",
            DocumentoKind::Avaliacao => "avaliacao_pdf",
        }
    }
}

impl FromStr for DocumentoKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "laudo" => Ok(DocumentoKind::Laudo),
            "avaliacao" | "avaliação" => Ok(DocumentoKind::Avaliacao),
            _ => Err(()),
        }
    }
}

/// A stored visit record.
///
/// Dates are kept as [`NaiveDate`] and serialized ISO (`YYYY-MM-DD`);
/// the `dd/mm/YYYY` form only exists at the input boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atendimento {
    pub id: Option<i64>,
    pub empresa: String,
    pub nome: String,
    pub modalidade: Modalidade,
    pub data: NaiveDate,
    pub hora: NaiveTime,
    pub laudo_pdf: Option<String>,
    pub avaliacao_pdf: Option<String>,
    pub status: String,
    pub observacoes: Option<String>,
    pub data_criacao: Option<String>,
    pub data_atualizacao: Option<String>,
}

impl Atendimento {
    pub fn new(empresa: &str, nome: &str, modalidade: Modalidade, data: NaiveDate, hora: NaiveTime) -> Self {
        Self {
            id: None,
            empresa: empresa.to_string(),
            nome: nome.to_string(),
            modalidade,
            data,
            hora,
            laudo_pdf: None,
            avaliacao_pdf: None,
            status: STATUS_VALUES[0].to_string(),
            observacoes: None,
            data_criacao: None,
            data_atualizacao: None,
        }
    }
}

/// Raw creation payload as received from the API or the CLI.
///
/// All fields are boundary strings; `validation::validate_novo` turns this
/// into a typed [`Atendimento`] or a field-level error.
#[derive(Debug, Clone, Deserialize)]
pub struct NovoAtendimento {
    pub empresa: String,
    pub nome: String,
    pub modalidade: String,
    /// Visit date in `dd/mm/YYYY`.
    pub data: String,
    /// Visit time in `HH:MM`.
    pub hora: String,
    pub status: Option<String>,
    pub observacoes: Option<String>,
}

/// Partial update payload; only the present fields are touched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtendimentoUpdate {
    pub empresa: Option<String>,
    pub nome: Option<String>,
    pub modalidade: Option<String>,
    pub data: Option<String>,
    pub hora: Option<String>,
    pub status: Option<String>,
    pub observacoes: Option<String>,
}

impl AtendimentoUpdate {
    pub fn is_empty(&self) -> bool {
        self.empresa.is_none()
            && self.nome.is_none()
            && self.modalidade.is_none()
            && self.data.is_none()
            && self.hora.is_none()
            && self.status.is_none()
            && self.observacoes.is_none()
    }
}

/// A validated update: every present field is already sanitized and typed.
///
/// Produced by `validation::validate_update`; the storage layer applies it
/// without further checks.
#[derive(Debug, Clone, Default)]
pub struct AtendimentoPatch {
    pub empresa: Option<String>,
    pub nome: Option<String>,
    pub modalidade: Option<Modalidade>,
    pub data: Option<NaiveDate>,
    pub hora: Option<NaiveTime>,
    pub status: Option<String>,
    pub observacoes: Option<String>,
}

/// Combinable listing predicates. All present filters apply together.
#[derive(Debug, Clone, Default)]
pub struct AtendimentoFilter {
    /// Exact visit date.
    pub data: Option<NaiveDate>,
    /// Inclusive range start.
    pub data_inicio: Option<NaiveDate>,
    /// Inclusive range end.
    pub data_fim: Option<NaiveDate>,
    /// Case-insensitive substring on the company name.
    pub empresa: Option<String>,
    /// Case-insensitive substring on the patient name.
    pub nome: Option<String>,
    pub modalidade: Option<Modalidade>,
}

/// Aggregate statistics backing the dashboard cards and report charts.
#[derive(Debug, Default, Serialize)]
pub struct Stats {
    pub total_atendimentos: i64,
    pub total_empresas: i64,
    pub laudos_enviados: i64,
    pub avaliacoes_enviadas: i64,
    /// (modalidade, count) pairs, most frequent first.
    pub por_modalidade: Vec<(String, i64)>,
    /// (ISO date, count) pairs in chronological order.
    pub por_data: Vec<(String, i64)>,
}
