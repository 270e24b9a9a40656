//! Process detail screen: single-record view, document links, and the inline
//! editor that resubmits the record with optional per-slot replacements.

use chrono::NaiveDate;

use siae_core::{Process, UpdateProcessForm, due_date};

use crate::backend::SiaeBackend;
use crate::notify::Notifier;
use crate::resource::Resource;

pub struct ProcessDetailPage<B: SiaeBackend> {
    backend: B,
    pub id: i64,
    pub process: Resource<Process>,
    pub editor: Option<UpdateProcessForm>,
    pub saving: bool,
    pub notifier: Notifier,
}

impl<B: SiaeBackend> ProcessDetailPage<B> {
    pub fn new(backend: B, id: i64) -> Self {
        Self {
            backend,
            id,
            process: Resource::new(),
            editor: None,
            saving: false,
            notifier: Notifier::default(),
        }
    }

    pub async fn load(&mut self) {
        self.process.begin();
        let result = self.backend.get_process(self.id).await;
        self.process.resolve(result);
    }

    /// Labelled URLs for the document slots that have been uploaded.
    pub fn document_links(&self) -> Vec<(&'static str, &str)> {
        let Some(process) = self.process.value() else {
            return Vec::new();
        };
        let docs = &process.documents;
        [
            ("Personal request", docs.request_url.as_deref()),
            ("Legal request memo", docs.legal_memo_url.as_deref()),
            ("Legal opinion", docs.legal_opinion_url.as_deref()),
            ("Executive memo", docs.executive_memo_url.as_deref()),
            ("Executive decision", docs.executive_decision_url.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| Some((label, url?)))
        .collect()
    }

    /// Terminal processes are read-only.
    pub fn start_edit(&mut self) {
        if let Some(process) = self.process.value()
            && process.is_active()
        {
            self.editor = Some(UpdateProcessForm::prefill(process));
        }
    }

    /// Due date recomputed live from the editor's opening date and estimate;
    /// falls back to the loaded record outside edit mode.
    pub fn due_date_preview(&self) -> Option<NaiveDate> {
        match &self.editor {
            Some(form) => {
                let opened = form.opened_on?;
                (form.estimate_days > 0).then(|| due_date(opened, form.estimate_days))
            }
            None => self.process.value()?.derived_due_date(),
        }
    }

    pub fn cancel_edit(&mut self) {
        if !self.saving {
            self.editor = None;
        }
    }

    pub async fn save(&mut self) -> bool {
        let Some(form) = self.editor.clone() else {
            return false;
        };
        if !form.is_valid() {
            self.notifier.warning("Fill in all required fields.");
            return false;
        }

        self.saving = true;
        let result = self.backend.update_process(self.id, form).await;
        self.saving = false;
        match result {
            Ok(updated) => {
                // The server response is authoritative (recomputed due date,
                // refreshed document URLs); no second fetch needed.
                self.process.set(updated);
                self.editor = None;
                self.notifier.success("Process updated.");
                true
            }
            Err(err) => {
                self.notifier.error(err.user_message("Could not update the process."));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use crate::resource::LoadState;
    use crate::testing::FakeBackend;
    use siae_core::{ProcessStatus, Sector};

    async fn loaded_page(status: ProcessStatus) -> ProcessDetailPage<FakeBackend> {
        let backend = FakeBackend::default();
        backend.push_process(7, "Ana Lima", Sector::Cabinet, status);
        let mut page = ProcessDetailPage::new(backend, 7);
        page.load().await;
        page
    }

    #[tokio::test]
    async fn load_resolves_the_record() {
        let page = loaded_page(ProcessStatus::InProgressExecutive).await;
        assert_eq!(page.process.state(), LoadState::Success);
        assert_eq!(page.process.value().unwrap().beneficiary, "Ana Lima");
    }

    #[tokio::test]
    async fn load_unknown_id_reports_error() {
        let backend = FakeBackend::default();
        let mut page = ProcessDetailPage::new(backend, 99);
        page.load().await;
        assert_eq!(page.process.state(), LoadState::Error);
        assert!(page.process.value().is_none());
    }

    #[tokio::test]
    async fn editor_prefills_and_saves_authoritative_response() {
        let mut page = loaded_page(ProcessStatus::InProgressLegal).await;
        page.start_edit();
        let form = page.editor.as_mut().unwrap();
        assert_eq!(form.beneficiary_name, "Ana Lima");
        form.subject = "Revisao de gratificacao".into();

        assert!(page.save().await);
        assert!(page.editor.is_none());
        assert!(!page.saving);
        assert_eq!(
            page.process.value().unwrap().subject.as_deref(),
            Some("Revisao de gratificacao")
        );
        assert_eq!(page.notifier.current().unwrap().severity, Severity::Success);
    }

    #[tokio::test]
    async fn save_failure_keeps_editor_open() {
        let backend = FakeBackend::default();
        backend.push_process(7, "Ana Lima", Sector::Cabinet, ProcessStatus::InProgressLegal);
        let mut page = ProcessDetailPage::new(backend.clone(), 7);
        page.load().await;
        page.start_edit();
        page.editor.as_mut().unwrap().subject = "Nova pauta".into();
        backend.fail_next(422, r#"{"message":"Dados invalidos"}"#);

        assert!(!page.save().await);
        assert!(page.editor.is_some());
        let note = page.notifier.current().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert_eq!(note.message, "Dados invalidos");
    }

    #[tokio::test]
    async fn invalid_editor_never_reaches_backend() {
        let backend = FakeBackend::default();
        backend.push_process(7, "Ana Lima", Sector::Cabinet, ProcessStatus::InProgressLegal);
        let mut page = ProcessDetailPage::new(backend.clone(), 7);
        page.load().await;
        page.start_edit();
        page.editor.as_mut().unwrap().beneficiary_name = "Ab".into();

        assert!(!page.save().await);
        assert_eq!(page.notifier.current().unwrap().severity, Severity::Warning);
        assert!(!backend.log_contains("update_process"));
    }

    #[tokio::test]
    async fn due_date_preview_tracks_editor_fields() {
        let mut page = loaded_page(ProcessStatus::InProgressLegal).await;
        // Record view: opened 2026-08-01 with a 30-day estimate.
        assert_eq!(page.due_date_preview(), Some("2026-08-31".parse().unwrap()));

        page.start_edit();
        page.editor.as_mut().unwrap().estimate_days = 10;
        assert_eq!(page.due_date_preview(), Some("2026-08-11".parse().unwrap()));

        page.editor.as_mut().unwrap().opened_on = Some("2026-08-20".parse().unwrap());
        assert_eq!(page.due_date_preview(), Some("2026-08-30".parse().unwrap()));
    }

    #[tokio::test]
    async fn terminal_process_is_read_only() {
        let mut page = loaded_page(ProcessStatus::Finalized).await;
        page.start_edit();
        assert!(page.editor.is_none());
    }

    #[tokio::test]
    async fn document_links_skip_empty_slots() {
        let page = loaded_page(ProcessStatus::InProgressLegal).await;
        // Fake records start with no uploaded documents.
        assert!(page.document_links().is_empty());
    }
}
