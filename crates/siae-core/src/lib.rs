//! Domain layer of the SIAE client: wire-compatible records, the process
//! list projection, display formatters, and per-screen form contracts.
//!
//! Everything here is pure and synchronous; network access lives in
//! `siae-client` and screen orchestration in `siae-app`.

pub mod filter;
pub mod format;
pub mod forms;
pub mod model;

pub use filter::{DateField, FilterCriteria, project};
pub use format::{format_bytes, format_date_br, format_phone};
pub use forms::{
    Attachment, CancelForm, CertificateForm, CreateProcessForm, FinalizeForm, FormError, FormPart,
    MAX_ATTACHMENT_BYTES, ServerForm, TransferForm, UpdateProcessForm,
};
pub use model::{
    AttachedDocs, Backup, BackupOrigin, BackupStatus, CertificateInfo, HealthStatus, Process,
    ProcessStatus, Sector, ServerRecord, ServiceHealth, SignaturePrep, StatusTone, due_date,
};
