//! Process list screen: fetched collection, filter projection, and the four
//! action modals (create, transfer, finalize, cancel).
//!
//! Every mutating submit follows the same discipline: client-side guard, an
//! independent in-flight flag, refetch on success before the modal closes,
//! and a notification on failure with the modal state left intact for retry.

use chrono::NaiveDate;
use tracing::warn;

use siae_core::{
    CancelForm, CreateProcessForm, FilterCriteria, FinalizeForm, Process, ServerRecord,
    TransferForm, project,
};

use crate::backend::SiaeBackend;
use crate::notify::Notifier;
use crate::resource::Resource;

/// Context-menu entries available for a selected process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessAction {
    ViewDetails,
    TransferSector,
    Finalize,
    Cancel,
}

pub struct ProcessListPage<B: SiaeBackend> {
    backend: B,
    pub records: Resource<Vec<Process>>,
    pub filter: FilterCriteria,
    pub selected: Option<i64>,
    pub suggestions: Vec<ServerRecord>,
    pub notifier: Notifier,

    pub create: Option<CreateProcessForm>,
    pub saving: bool,
    pub transfer: Option<TransferForm>,
    pub transferring: bool,
    pub finalize: Option<FinalizeForm>,
    pub finalizing: bool,
    pub cancel: Option<CancelForm>,
    pub cancelling: bool,
}

impl<B: SiaeBackend> ProcessListPage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Resource::new(),
            filter: FilterCriteria::default(),
            selected: None,
            suggestions: Vec::new(),
            notifier: Notifier::default(),
            create: None,
            saving: false,
            transfer: None,
            transferring: false,
            finalize: None,
            finalizing: false,
            cancel: None,
            cancelling: false,
        }
    }

    pub async fn refresh(&mut self) {
        self.records.begin();
        let result = self.backend.list_processes().await;
        self.records.resolve(result);
    }

    /// Filtered and sorted view of the fetched collection.
    pub fn visible(&self) -> Vec<&Process> {
        let records = self.records.value().map(Vec::as_slice).unwrap_or(&[]);
        project(records, &self.filter)
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    pub fn select(&mut self, id: i64) {
        self.selected = Some(id);
    }

    pub fn selected_process(&self) -> Option<&Process> {
        let id = self.selected?;
        self.records.value()?.iter().find(|p| p.id == id)
    }

    /// Transfer/finalize/cancel are gated on a non-terminal status.
    pub fn available_actions(&self) -> Vec<ProcessAction> {
        let Some(process) = self.selected_process() else {
            return Vec::new();
        };
        let mut actions = vec![ProcessAction::ViewDetails];
        if process.is_active() {
            actions.extend([
                ProcessAction::TransferSector,
                ProcessAction::Finalize,
                ProcessAction::Cancel,
            ]);
        }
        actions
    }

    // ── Create modal ──

    pub fn open_create(&mut self, today: NaiveDate) {
        self.create = Some(CreateProcessForm::new(today));
    }

    pub fn close_create(&mut self) {
        if !self.saving {
            self.create = None;
        }
    }

    /// Fetch beneficiary-name suggestions; only queries of 3+ characters hit
    /// the backend. A failed lookup is logged, never surfaced.
    pub async fn suggest_servers(&mut self, query: &str) {
        if query.len() < 3 {
            return;
        }
        match self.backend.search_servers(query).await {
            Ok(servers) => self.suggestions = servers,
            Err(err) => warn!(error = %err, "server suggestion lookup failed"),
        }
    }

    /// Selecting a suggestion fills both name and phone.
    pub fn apply_suggestion(&mut self, suggestion: &ServerRecord) {
        if let Some(form) = self.create.as_mut() {
            form.beneficiary_name = suggestion.full_name.clone();
            form.phone = suggestion.phone.clone().unwrap_or_default();
        }
    }

    pub async fn submit_create(&mut self) -> bool {
        let Some(form) = self.create.clone() else {
            return false;
        };
        if !form.is_valid() {
            self.notifier.warning("Fill in all required fields.");
            return false;
        }

        self.saving = true;
        let result = self.backend.create_process(form).await;
        self.saving = false;
        match result {
            Ok(()) => {
                // Refetch before the modal closes so the table already shows
                // the new record when the dialog disappears.
                self.refresh().await;
                self.create = None;
                self.notifier.success("Process created.");
                true
            }
            Err(err) => {
                self.notifier.error(err.user_message("Could not create the process."));
                false
            }
        }
    }

    // ── Transfer modal ──

    pub fn open_transfer(&mut self) {
        if self.selected_process().is_some_and(Process::is_active) {
            self.transfer = Some(TransferForm::default());
        }
    }

    pub async fn confirm_transfer(&mut self) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(form) = self.transfer.clone() else {
            return false;
        };
        if !form.has_document() {
            self.notifier.warning("Attach at least one document.");
            return false;
        }

        self.transferring = true;
        let result = self.backend.transfer_process(id, form).await;
        self.transferring = false;
        match result {
            Ok(()) => {
                self.refresh().await;
                self.transfer = None;
                self.notifier.success("Documents sent and signed by the backend.");
                true
            }
            Err(err) if err.is_missing_certificate() => {
                self.notifier.error("No digital certificate is configured.");
                false
            }
            Err(_) => {
                self.notifier.error("Could not transfer the process.");
                false
            }
        }
    }

    // ── Finalize modal ──

    pub fn open_finalize(&mut self) {
        if self.selected_process().is_some_and(Process::is_active) {
            self.finalize = Some(FinalizeForm::default());
        }
    }

    pub async fn confirm_finalize(&mut self) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(form) = self.finalize.clone() else {
            return false;
        };
        if !form.is_valid() {
            self.notifier.warning("Attach the executive decision to finalize.");
            return false;
        }

        self.finalizing = true;
        let result = self.backend.finalize_process(id, form).await;
        self.finalizing = false;
        match result {
            Ok(()) => {
                self.refresh().await;
                self.finalize = None;
                self.notifier.success("Process finalized.");
                true
            }
            Err(err) => {
                self.notifier.error(err.user_message("Could not finalize the process."));
                false
            }
        }
    }

    // ── Cancel modal ──

    pub fn open_cancel(&mut self) {
        if self.selected_process().is_some_and(Process::is_active) {
            self.cancel = Some(CancelForm::default());
        }
    }

    pub async fn confirm_cancel(&mut self) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(form) = self.cancel.clone() else {
            return false;
        };
        if !form.is_valid() {
            self.notifier.warning("Enter a justification of at least 5 characters.");
            return false;
        }

        self.cancelling = true;
        let result = self.backend.cancel_process(id, form).await;
        self.cancelling = false;
        match result {
            Ok(()) => {
                self.refresh().await;
                self.cancel = None;
                self.notifier.success("Process cancelled.");
                true
            }
            Err(err) => {
                self.notifier.error(err.user_message("Could not cancel the process."));
                false
            }
        }
    }
}
