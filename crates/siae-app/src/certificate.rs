//! Digital certificate configuration screen.
//!
//! The system holds zero or one signing certificate; "not configured" is a
//! normal state, not an error, so a 404 from the backend resolves to `None`.

use chrono::NaiveDateTime;

use siae_core::{CertificateForm, CertificateInfo};

use crate::backend::SiaeBackend;
use crate::notify::Notifier;
use crate::resource::Resource;

pub struct CertificatePage<B: SiaeBackend> {
    backend: B,
    pub info: Resource<Option<CertificateInfo>>,
    pub form: CertificateForm,
    pub uploading: bool,
    pub deleting: bool,
    pub notifier: Notifier,
}

impl<B: SiaeBackend> CertificatePage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            info: Resource::new(),
            form: CertificateForm::default(),
            uploading: false,
            deleting: false,
            notifier: Notifier::default(),
        }
    }

    /// An absent certificate arrives as `Ok(None)`; only real failures notify.
    pub async fn load(&mut self) {
        self.info.begin();
        let result = self.backend.get_certificate().await;
        if let Err(err) = &result {
            self.notifier.error(err.user_message("Could not load the certificate."));
        }
        self.info.resolve(result);
    }

    pub fn configured(&self) -> Option<&CertificateInfo> {
        self.info.value()?.as_ref()
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.configured().is_some_and(|cert| cert.is_expired(now))
    }

    pub async fn upload(&mut self) -> bool {
        if !self.form.is_valid() {
            self.notifier.warning("Select a certificate file and enter its password.");
            return false;
        }

        self.uploading = true;
        let result = self.backend.upload_certificate(self.form.clone()).await;
        self.uploading = false;
        match result {
            Ok(()) => {
                self.load().await;
                self.form = CertificateForm::default();
                self.notifier.success("Certificate configured.");
                true
            }
            Err(err) => {
                self.notifier.error(err.user_message("Could not configure the certificate."));
                false
            }
        }
    }

    pub async fn remove(&mut self) -> bool {
        if self.configured().is_none() {
            return false;
        }

        self.deleting = true;
        let result = self.backend.delete_certificate().await;
        self.deleting = false;
        match result {
            Ok(()) => {
                self.load().await;
                self.notifier.success("Certificate removed.");
                true
            }
            Err(err) => {
                self.notifier.error(err.user_message("Could not remove the certificate."));
                false
            }
        }
    }
}
