//! Public-employee registry screen: name search plus a single modal shared by
//! the create and edit flows.

use siae_core::{ServerForm, ServerRecord};

use crate::backend::SiaeBackend;
use crate::notify::Notifier;
use crate::resource::Resource;

pub struct ServersPage<B: SiaeBackend> {
    backend: B,
    pub records: Resource<Vec<ServerRecord>>,
    pub query: String,
    /// `None` id means the modal is creating a new record.
    pub editor: Option<(Option<i64>, ServerForm)>,
    pub saving: bool,
    pub notifier: Notifier,
}

impl<B: SiaeBackend> ServersPage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Resource::new(),
            query: String::new(),
            editor: None,
            saving: false,
            notifier: Notifier::default(),
        }
    }

    /// Re-runs the current search; a blank query lists everything.
    pub async fn refresh(&mut self) {
        self.records.begin();
        let query = self.query.trim().to_string();
        let result = if query.is_empty() {
            self.backend.list_servers().await
        } else {
            self.backend.search_servers(&query).await
        };
        self.records.resolve(result);
    }

    pub async fn clear_search(&mut self) {
        self.query.clear();
        self.refresh().await;
    }

    pub fn open_create(&mut self) {
        self.editor = Some((None, ServerForm::default()));
    }

    pub fn open_edit(&mut self, record: &ServerRecord) {
        self.editor = Some((
            Some(record.id),
            ServerForm {
                full_name: record.full_name.clone(),
                phone: record.phone.clone().unwrap_or_default(),
            },
        ));
    }

    pub fn close_editor(&mut self) {
        if !self.saving {
            self.editor = None;
        }
    }

    pub async fn submit(&mut self) -> bool {
        let Some((id, form)) = self.editor.clone() else {
            return false;
        };
        if !form.is_valid() {
            self.notifier.warning("Enter a full name and a valid phone number.");
            return false;
        }

        self.saving = true;
        let result = match id {
            Some(id) => self.backend.update_server(id, form).await,
            None => self.backend.create_server(form).await,
        };
        self.saving = false;
        match result {
            Ok(()) => {
                self.refresh().await;
                self.editor = None;
                self.notifier.success(if id.is_some() {
                    "Employee updated."
                } else {
                    "Employee registered."
                });
                true
            }
            Err(err) => {
                self.notifier.error(err.user_message("Could not save the employee."));
                false
            }
        }
    }
}
