//! Seam between view-models and the HTTP layer.
//!
//! [`ApiClient`] is the production implementation; tests substitute an
//! in-memory fake. Dropping a view-model future drops the underlying request,
//! so unmounting a screen cancels its in-flight calls.

use async_trait::async_trait;

use siae_client::{ApiClient, ApiError};
use siae_core::{
    Backup, CancelForm, CertificateForm, CertificateInfo, CreateProcessForm, FinalizeForm,
    HealthStatus, Process, ServerForm, ServerRecord, TransferForm, UpdateProcessForm,
};

#[async_trait]
pub trait SiaeBackend: Send + Sync {
    async fn list_processes(&self) -> Result<Vec<Process>, ApiError>;
    async fn get_process(&self, id: i64) -> Result<Process, ApiError>;
    async fn create_process(&self, form: CreateProcessForm) -> Result<(), ApiError>;
    async fn update_process(&self, id: i64, form: UpdateProcessForm) -> Result<Process, ApiError>;
    async fn cancel_process(&self, id: i64, form: CancelForm) -> Result<(), ApiError>;
    async fn transfer_process(&self, id: i64, form: TransferForm) -> Result<(), ApiError>;
    async fn finalize_process(&self, id: i64, form: FinalizeForm) -> Result<(), ApiError>;

    async fn list_servers(&self) -> Result<Vec<ServerRecord>, ApiError>;
    async fn search_servers(&self, name: &str) -> Result<Vec<ServerRecord>, ApiError>;
    async fn create_server(&self, form: ServerForm) -> Result<(), ApiError>;
    async fn update_server(&self, id: i64, form: ServerForm) -> Result<(), ApiError>;

    async fn list_backups(&self) -> Result<Vec<Backup>, ApiError>;
    async fn trigger_backup(&self) -> Result<(), ApiError>;
    fn backup_download_url(&self, id: i64) -> String;

    async fn get_certificate(&self) -> Result<Option<CertificateInfo>, ApiError>;
    async fn upload_certificate(&self, form: CertificateForm) -> Result<(), ApiError>;
    async fn delete_certificate(&self) -> Result<(), ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;
}

#[async_trait]
impl SiaeBackend for ApiClient {
    async fn list_processes(&self) -> Result<Vec<Process>, ApiError> {
        ApiClient::list_processes(self).await
    }

    async fn get_process(&self, id: i64) -> Result<Process, ApiError> {
        ApiClient::get_process(self, id).await
    }

    async fn create_process(&self, form: CreateProcessForm) -> Result<(), ApiError> {
        ApiClient::create_process(self, form).await
    }

    async fn update_process(&self, id: i64, form: UpdateProcessForm) -> Result<Process, ApiError> {
        ApiClient::update_process(self, id, form).await
    }

    async fn cancel_process(&self, id: i64, form: CancelForm) -> Result<(), ApiError> {
        ApiClient::cancel_process(self, id, form).await
    }

    async fn transfer_process(&self, id: i64, form: TransferForm) -> Result<(), ApiError> {
        ApiClient::transfer_process(self, id, form).await
    }

    async fn finalize_process(&self, id: i64, form: FinalizeForm) -> Result<(), ApiError> {
        ApiClient::finalize_process(self, id, form).await
    }

    async fn list_servers(&self) -> Result<Vec<ServerRecord>, ApiError> {
        ApiClient::list_servers(self).await
    }

    async fn search_servers(&self, name: &str) -> Result<Vec<ServerRecord>, ApiError> {
        ApiClient::search_servers(self, name).await
    }

    async fn create_server(&self, form: ServerForm) -> Result<(), ApiError> {
        ApiClient::create_server(self, form).await
    }

    async fn update_server(&self, id: i64, form: ServerForm) -> Result<(), ApiError> {
        ApiClient::update_server(self, id, form).await
    }

    async fn list_backups(&self) -> Result<Vec<Backup>, ApiError> {
        ApiClient::list_backups(self).await
    }

    async fn trigger_backup(&self) -> Result<(), ApiError> {
        ApiClient::trigger_backup(self).await
    }

    fn backup_download_url(&self, id: i64) -> String {
        ApiClient::backup_download_url(self, id)
    }

    async fn get_certificate(&self) -> Result<Option<CertificateInfo>, ApiError> {
        ApiClient::get_certificate(self).await
    }

    async fn upload_certificate(&self, form: CertificateForm) -> Result<(), ApiError> {
        ApiClient::upload_certificate(self, form).await
    }

    async fn delete_certificate(&self) -> Result<(), ApiError> {
        ApiClient::delete_certificate(self).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        ApiClient::health(self).await
    }
}
