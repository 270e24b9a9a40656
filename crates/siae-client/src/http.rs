//! Endpoint-per-method client over `reqwest`.

use reqwest::StatusCode;
use reqwest::multipart;
use tracing::info;

use siae_core::{
    Backup, CancelForm, CertificateForm, CertificateInfo, CreateProcessForm, FinalizeForm,
    FormPart, HealthStatus, Process, ServerForm, ServerRecord, SignaturePrep, TransferForm,
    UpdateProcessForm,
};

use crate::error::ApiError;

/// HTTP client bound to one SIAE backend base URL.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` should be like `http://localhost:8080` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn ok(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_body(status.as_u16(), body));
        }
        Ok(resp)
    }

    fn multipart(parts: Vec<FormPart>) -> multipart::Form {
        let mut form = multipart::Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File { name, attachment } => form.part(
                    name,
                    multipart::Part::bytes(attachment.bytes).file_name(attachment.file_name),
                ),
            };
        }
        form
    }

    // ── Processes ──

    pub async fn list_processes(&self) -> Result<Vec<Process>, ApiError> {
        let url = self.url("/processos");
        let resp = Self::ok(self.client.get(&url).send().await?).await?;
        let processes: Vec<Process> = resp.json().await?;
        info!(count = processes.len(), "fetched process list");
        Ok(processes)
    }

    pub async fn get_process(&self, id: i64) -> Result<Process, ApiError> {
        let url = self.url(&format!("/processos/{id}"));
        let resp = Self::ok(self.client.get(&url).send().await?).await?;
        Ok(resp.json().await?)
    }

    pub async fn create_process(&self, form: CreateProcessForm) -> Result<(), ApiError> {
        let url = self.url("/processos");
        info!(url = %url, "creating process");
        let body = Self::multipart(form.into_parts()?);
        Self::ok(self.client.post(&url).multipart(body).send().await?).await?;
        Ok(())
    }

    /// Returns the server's authoritative record after the update.
    pub async fn update_process(
        &self,
        id: i64,
        form: UpdateProcessForm,
    ) -> Result<Process, ApiError> {
        let url = self.url(&format!("/processos/{id}"));
        info!(url = %url, "updating process");
        let body = Self::multipart(form.into_parts());
        let resp = Self::ok(self.client.put(&url).multipart(body).send().await?).await?;
        Ok(resp.json().await?)
    }

    pub async fn cancel_process(&self, id: i64, form: CancelForm) -> Result<(), ApiError> {
        form.validate()?;
        let url = self.url(&format!("/processos/{id}/cancelar"));
        info!(url = %url, "cancelling process");
        Self::ok(self.client.put(&url).json(&form).send().await?).await?;
        Ok(())
    }

    pub async fn transfer_process(&self, id: i64, form: TransferForm) -> Result<(), ApiError> {
        let url = self.url(&format!("/processos/{id}/transferencia"));
        info!(url = %url, "transferring process");
        let body = Self::multipart(form.into_parts()?);
        Self::ok(self.client.put(&url).multipart(body).send().await?).await?;
        Ok(())
    }

    pub async fn finalize_process(&self, id: i64, form: FinalizeForm) -> Result<(), ApiError> {
        let url = self.url(&format!("/processos/{id}/finalizar"));
        info!(url = %url, "finalizing process");
        let body = Self::multipart(form.into_parts()?);
        Self::ok(self.client.put(&url).multipart(body).send().await?).await?;
        Ok(())
    }

    // ── Public employees ──

    pub async fn list_servers(&self) -> Result<Vec<ServerRecord>, ApiError> {
        let url = self.url("/servidor-publico");
        let resp = Self::ok(self.client.get(&url).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Name autocomplete; callers only query once the term reaches 3 chars.
    pub async fn search_servers(&self, name: &str) -> Result<Vec<ServerRecord>, ApiError> {
        let url = self.url("/servidor-publico/buscar");
        let resp = self.client.get(&url).query(&[("nome", name)]).send().await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    pub async fn create_server(&self, form: ServerForm) -> Result<(), ApiError> {
        let url = self.url("/servidor-publico");
        info!(url = %url, "creating public employee");
        Self::ok(self.client.post(&url).json(&form).send().await?).await?;
        Ok(())
    }

    pub async fn update_server(&self, id: i64, form: ServerForm) -> Result<(), ApiError> {
        let url = self.url(&format!("/servidor-publico/{id}"));
        info!(url = %url, "updating public employee");
        Self::ok(self.client.put(&url).json(&form).send().await?).await?;
        Ok(())
    }

    // ── Backups ──

    pub async fn list_backups(&self) -> Result<Vec<Backup>, ApiError> {
        let url = self.url("/api/backups");
        let resp = Self::ok(self.client.get(&url).send().await?).await?;
        Ok(resp.json().await?)
    }

    pub async fn trigger_backup(&self) -> Result<(), ApiError> {
        let url = self.url("/api/backups");
        info!(url = %url, "requesting manual backup");
        Self::ok(self.client.post(&url).send().await?).await?;
        Ok(())
    }

    /// Download URL for a finished backup; the stream is opened directly by
    /// the caller (browser tab or shell), not fetched through this client.
    pub fn backup_download_url(&self, id: i64) -> String {
        self.url(&format!("/api/backups/{id}/download"))
    }

    // ── Certificate ──

    /// `Ok(None)` when no certificate is configured (backend 404).
    pub async fn get_certificate(&self) -> Result<Option<CertificateInfo>, ApiError> {
        let url = self.url("/api/config/certificado");
        match Self::ok(self.client.get(&url).send().await?).await {
            Ok(resp) => Ok(Some(resp.json().await?)),
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn upload_certificate(&self, form: CertificateForm) -> Result<(), ApiError> {
        let url = self.url("/api/config/certificado");
        info!(url = %url, "uploading certificate");
        let body = Self::multipart(form.into_parts()?);
        Self::ok(self.client.post(&url).multipart(body).send().await?).await?;
        Ok(())
    }

    pub async fn delete_certificate(&self) -> Result<(), ApiError> {
        let url = self.url("/api/config/certificado");
        info!(url = %url, "removing certificate");
        Self::ok(self.client.delete(&url).send().await?).await?;
        Ok(())
    }

    // ── Health ──

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.url("/api/health");
        let resp = Self::ok(self.client.get(&url).send().await?).await?;
        Ok(resp.json().await?)
    }

    // ── Signing helper ──
    //
    // Present in the backend API but not wired into the transfer/finalize
    // flows, which request server-side signing via boolean flags instead.

    pub async fn prepare_signature(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<SignaturePrep, ApiError> {
        let url = self.url("/assinatura/preparar");
        let body = multipart::Form::new()
            .part("arquivo", multipart::Part::bytes(bytes).file_name(file_name));
        let resp = Self::ok(self.client.post(&url).multipart(body).send().await?).await?;
        Ok(resp.json().await?)
    }

    pub async fn finalize_signature(
        &self,
        temp_id: &str,
        signature_base64: &str,
        certificate_base64: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&format!("/assinatura/finalizar/{temp_id}"));
        let body = serde_json::json!({
            "assinaturaBase64": signature_base64,
            "certificadoBase64": certificate_base64,
        });
        let resp = Self::ok(self.client.post(&url).json(&body).send().await?).await?;
        Ok(resp.bytes().await?.to_vec())
    }
}
