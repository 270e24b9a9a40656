//! Wire-level records of the SIAE backend.
//!
//! Field names are pinned with explicit `serde` renames so the Rust names can
//! stay idiomatic while the JSON stays byte-compatible with the backend binder.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a process.
///
/// Closed enum instead of the backend's underscore-separated strings; action
/// availability and display tone are derived by exhaustive matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessStatus {
    #[serde(rename = "Em_Processamento_Juridico")]
    InProgressLegal,
    #[serde(rename = "Em_Processamento_Prefeito")]
    InProgressExecutive,
    #[serde(rename = "Finalizado")]
    Finalized,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl ProcessStatus {
    /// Terminal states admit no further transfer/finalize/cancel actions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessStatus::Finalized | ProcessStatus::Cancelled)
    }

    /// Human-readable label (wire name with underscores replaced).
    pub fn label(self) -> &'static str {
        match self {
            ProcessStatus::InProgressLegal => "Em Processamento Juridico",
            ProcessStatus::InProgressExecutive => "Em Processamento Prefeito",
            ProcessStatus::Finalized => "Finalizado",
            ProcessStatus::Cancelled => "Cancelado",
        }
    }

    /// Display tone for status chips.
    pub fn tone(self) -> StatusTone {
        match self {
            ProcessStatus::Finalized => StatusTone::Success,
            ProcessStatus::Cancelled => StatusTone::Error,
            ProcessStatus::InProgressLegal | ProcessStatus::InProgressExecutive => {
                StatusTone::Warning
            }
        }
    }

    /// Wire name as sent by the backend.
    pub fn wire_name(self) -> &'static str {
        match self {
            ProcessStatus::InProgressLegal => "Em_Processamento_Juridico",
            ProcessStatus::InProgressExecutive => "Em_Processamento_Prefeito",
            ProcessStatus::Finalized => "Finalizado",
            ProcessStatus::Cancelled => "Cancelado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Warning,
    Error,
}

/// Organizational destination of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "JURIDICO")]
    Legal,
    #[serde(rename = "GABINETE")]
    Cabinet,
}

impl Sector {
    pub fn wire_name(self) -> &'static str {
        match self {
            Sector::Legal => "JURIDICO",
            Sector::Cabinet => "GABINETE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sector::Legal => "Juridico",
            Sector::Cabinet => "Gabinete",
        }
    }
}

/// URLs of the five named document slots attached to a process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttachedDocs {
    #[serde(rename = "reqPessoaUrl")]
    pub request_url: Option<String>,
    #[serde(rename = "memSolicitacaoJurUrl")]
    pub legal_memo_url: Option<String>,
    #[serde(rename = "parecerJuridicoUrl")]
    pub legal_opinion_url: Option<String>,
    #[serde(rename = "memorandoPrefUrl")]
    pub executive_memo_url: Option<String>,
    #[serde(rename = "decisaoPrefUrl")]
    pub executive_decision_url: Option<String>,
}

/// A tracked process, the system's primary record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    #[serde(rename = "id_processo")]
    pub id: i64,
    #[serde(rename = "nomeBeneficiado")]
    pub beneficiary: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "assunto")]
    pub subject: Option<String>,
    #[serde(rename = "setor")]
    pub sector: Sector,
    #[serde(rename = "dataAbertura")]
    pub opened_on: Option<NaiveDate>,
    #[serde(rename = "estimativa")]
    pub estimate_days: Option<i64>,
    #[serde(rename = "dataPrevisao")]
    pub due_on: Option<NaiveDate>,
    #[serde(rename = "dataFechamento")]
    pub closed_on: Option<NaiveDate>,
    pub status: ProcessStatus,
    #[serde(rename = "docsAnexados", default)]
    pub documents: AttachedDocs,
}

impl Process {
    /// A process is active while its status is non-terminal.
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Due date derived from opening date and estimate, when both are present.
    pub fn derived_due_date(&self) -> Option<NaiveDate> {
        match (self.opened_on, self.estimate_days) {
            (Some(opened), Some(days)) => Some(due_date(opened, days)),
            _ => None,
        }
    }
}

/// Invariant: due date is always opening date plus the estimate in days.
pub fn due_date(opened_on: NaiveDate, estimate_days: i64) -> NaiveDate {
    opened_on + Duration::days(estimate_days)
}

/// Public employee referenced as a process's responsible party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerRecord {
    #[serde(rename = "id_servidor")]
    pub id: i64,
    #[serde(rename = "nomeCompleto")]
    pub full_name: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackupOrigin {
    #[serde(rename = "MANUAL")]
    Manual,
    #[serde(rename = "AUTOMATICO")]
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackupStatus {
    #[serde(rename = "SUCESSO")]
    Success,
    #[serde(rename = "EM_ANDAMENTO")]
    InProgress,
    /// Anything else the backend reports is treated as a failure.
    #[serde(other)]
    Failed,
}

/// One database snapshot tracked by the backup manager.
#[derive(Debug, Clone, Deserialize)]
pub struct Backup {
    pub id: i64,
    #[serde(rename = "tipo")]
    pub origin: BackupOrigin,
    #[serde(rename = "dataCriacao")]
    pub created_at: NaiveDateTime,
    #[serde(rename = "nomeArquivo")]
    pub file_name: String,
    #[serde(rename = "tamanhoBytes")]
    pub size_bytes: Option<u64>,
    pub status: BackupStatus,
}

/// The system's single configured signing certificate (zero or one).
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateInfo {
    #[serde(rename = "nomeTitular")]
    pub holder: Option<String>,
    #[serde(rename = "emissor")]
    pub issuer: Option<String>,
    #[serde(rename = "dataValidade")]
    pub expires_at: Option<NaiveDateTime>,
}

impl CertificateInfo {
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at.is_some_and(|exp| exp < now)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ServiceHealth {
    #[serde(rename = "isUp")]
    pub is_up: bool,
}

/// Result of `GET /api/health`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HealthStatus {
    pub database: ServiceHealth,
    pub minio: ServiceHealth,
}

/// Response of the signing preparation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SignaturePrep {
    #[serde(rename = "tempId")]
    pub temp_id: String,
    #[serde(rename = "hashParaAssinar")]
    pub hash_to_sign: String,
}
