//! In-memory [`SiaeBackend`] used by the view-model tests.
//!
//! Keeps real collections so refetch-after-mutation is observable, records
//! every call in order, and can fail the next call with a canned server error.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use siae_client::ApiError;
use siae_core::{
    AttachedDocs, Backup, BackupOrigin, BackupStatus, CancelForm, CertificateForm,
    CertificateInfo, CreateProcessForm, FinalizeForm, HealthStatus, Process, ProcessStatus,
    Sector, ServerForm, ServerRecord, TransferForm, UpdateProcessForm,
};

use crate::backend::SiaeBackend;

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    processes: Vec<Process>,
    servers: Vec<ServerRecord>,
    backups: Vec<Backup>,
    certificate: Option<CertificateInfo>,
    health: HealthStatus,
    log: Vec<&'static str>,
    fail: Option<(u16, String)>,
    next_id: i64,
}

fn server_error(status: u16, body: String) -> ApiError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(String::from))
        .unwrap_or(body);
    ApiError::Server { status, message }
}

fn now() -> NaiveDateTime {
    "2026-08-26T12:00:00".parse().unwrap()
}

impl FakeBackend {
    pub fn push_process(&self, id: i64, beneficiary: &str, sector: Sector, status: ProcessStatus) {
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id);
        state.processes.push(Process {
            id,
            beneficiary: beneficiary.to_string(),
            phone: None,
            subject: Some("Assunto".to_string()),
            sector,
            opened_on: Some("2026-08-01".parse().unwrap()),
            estimate_days: Some(30),
            due_on: Some("2026-08-31".parse().unwrap()),
            closed_on: None,
            status,
            documents: AttachedDocs::default(),
        });
    }

    pub fn push_server(&self, id: i64, full_name: &str, phone: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id);
        state.servers.push(ServerRecord {
            id,
            full_name: full_name.to_string(),
            phone: Some(phone.to_string()),
        });
    }

    pub fn push_backup(&self, id: i64, origin: BackupOrigin, status: BackupStatus) {
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id);
        state.backups.push(Backup {
            id,
            origin,
            created_at: now(),
            file_name: format!("siae_{id}.sql"),
            size_bytes: Some(1_048_576),
            status,
        });
    }

    pub fn set_certificate(&self, certificate: Option<CertificateInfo>) {
        self.state.lock().unwrap().certificate = certificate;
    }

    pub fn set_health(&self, database: bool, minio: bool) {
        let mut state = self.state.lock().unwrap();
        state.health.database.is_up = database;
        state.health.minio.is_up = minio;
    }

    /// Fail the next backend call with a server error built from `body`.
    pub fn fail_next(&self, status: u16, body: &str) {
        self.state.lock().unwrap().fail = Some((status, body.to_string()));
    }

    pub fn log(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn log_contains(&self, name: &str) -> bool {
        self.state.lock().unwrap().log.iter().any(|entry| *entry == name)
    }

    fn call(&self, name: &'static str) -> Result<MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.log.push(name);
        if let Some((status, body)) = state.fail.take() {
            return Err(server_error(status, body));
        }
        Ok(state)
    }
}

#[async_trait]
impl SiaeBackend for FakeBackend {
    async fn list_processes(&self) -> Result<Vec<Process>, ApiError> {
        Ok(self.call("list_processes")?.processes.clone())
    }

    async fn get_process(&self, id: i64) -> Result<Process, ApiError> {
        let state = self.call("get_process")?;
        state.processes.iter().find(|p| p.id == id).cloned().ok_or(ApiError::NotFound)
    }

    async fn create_process(&self, form: CreateProcessForm) -> Result<(), ApiError> {
        let mut state = self.call("create_process")?;
        state.next_id += 1;
        let id = state.next_id;
        let opened_on = form.opened_on;
        state.processes.push(Process {
            id,
            beneficiary: form.beneficiary_name,
            phone: Some(form.phone),
            subject: Some(form.subject),
            sector: form.sector.unwrap_or(Sector::Legal),
            opened_on,
            estimate_days: Some(form.estimate_days),
            due_on: opened_on.map(|d| siae_core::due_date(d, form.estimate_days)),
            closed_on: None,
            status: ProcessStatus::InProgressLegal,
            documents: AttachedDocs::default(),
        });
        Ok(())
    }

    async fn update_process(&self, id: i64, form: UpdateProcessForm) -> Result<Process, ApiError> {
        let mut state = self.call("update_process")?;
        let process =
            state.processes.iter_mut().find(|p| p.id == id).ok_or(ApiError::NotFound)?;
        process.beneficiary = form.beneficiary_name;
        process.phone = Some(form.phone);
        process.subject = Some(form.subject);
        if let Some(sector) = form.sector {
            process.sector = sector;
        }
        process.opened_on = form.opened_on;
        process.estimate_days = Some(form.estimate_days);
        process.due_on = form.opened_on.map(|d| siae_core::due_date(d, form.estimate_days));
        Ok(process.clone())
    }

    async fn cancel_process(&self, id: i64, _form: CancelForm) -> Result<(), ApiError> {
        let mut state = self.call("cancel_process")?;
        let process =
            state.processes.iter_mut().find(|p| p.id == id).ok_or(ApiError::NotFound)?;
        process.status = ProcessStatus::Cancelled;
        Ok(())
    }

    async fn transfer_process(&self, id: i64, _form: TransferForm) -> Result<(), ApiError> {
        let mut state = self.call("transfer_process")?;
        let process =
            state.processes.iter_mut().find(|p| p.id == id).ok_or(ApiError::NotFound)?;
        process.status = ProcessStatus::InProgressExecutive;
        Ok(())
    }

    async fn finalize_process(&self, id: i64, _form: FinalizeForm) -> Result<(), ApiError> {
        let mut state = self.call("finalize_process")?;
        let process =
            state.processes.iter_mut().find(|p| p.id == id).ok_or(ApiError::NotFound)?;
        process.status = ProcessStatus::Finalized;
        process.closed_on = Some("2026-08-26".parse().unwrap());
        Ok(())
    }

    async fn list_servers(&self) -> Result<Vec<ServerRecord>, ApiError> {
        Ok(self.call("list_servers")?.servers.clone())
    }

    async fn search_servers(&self, name: &str) -> Result<Vec<ServerRecord>, ApiError> {
        let state = self.call("search_servers")?;
        let needle = name.to_lowercase();
        Ok(state
            .servers
            .iter()
            .filter(|s| s.full_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create_server(&self, form: ServerForm) -> Result<(), ApiError> {
        let mut state = self.call("create_server")?;
        state.next_id += 1;
        let id = state.next_id;
        state.servers.push(ServerRecord {
            id,
            full_name: form.full_name,
            phone: Some(form.phone),
        });
        Ok(())
    }

    async fn update_server(&self, id: i64, form: ServerForm) -> Result<(), ApiError> {
        let mut state = self.call("update_server")?;
        let server = state.servers.iter_mut().find(|s| s.id == id).ok_or(ApiError::NotFound)?;
        server.full_name = form.full_name;
        server.phone = Some(form.phone);
        Ok(())
    }

    async fn list_backups(&self) -> Result<Vec<Backup>, ApiError> {
        Ok(self.call("list_backups")?.backups.clone())
    }

    async fn trigger_backup(&self) -> Result<(), ApiError> {
        let mut state = self.call("trigger_backup")?;
        state.next_id += 1;
        let id = state.next_id;
        state.backups.push(Backup {
            id,
            origin: BackupOrigin::Manual,
            created_at: now(),
            file_name: format!("siae_{id}.sql"),
            size_bytes: None,
            status: BackupStatus::InProgress,
        });
        Ok(())
    }

    fn backup_download_url(&self, id: i64) -> String {
        format!("fake://backups/{id}/download")
    }

    async fn get_certificate(&self) -> Result<Option<CertificateInfo>, ApiError> {
        Ok(self.call("get_certificate")?.certificate.clone())
    }

    async fn upload_certificate(&self, _form: CertificateForm) -> Result<(), ApiError> {
        let mut state = self.call("upload_certificate")?;
        state.certificate = Some(CertificateInfo {
            holder: Some("Prefeitura Municipal".to_string()),
            issuer: Some("ICP-Brasil".to_string()),
            expires_at: Some("2027-08-26T00:00:00".parse().unwrap()),
        });
        Ok(())
    }

    async fn delete_certificate(&self) -> Result<(), ApiError> {
        self.call("delete_certificate")?.certificate = None;
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        Ok(self.call("health")?.health)
    }
}
