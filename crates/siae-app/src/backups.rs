//! Backup manager screen: snapshot listing, manual trigger, and download
//! links. The trigger is disabled while any snapshot is still in progress.

use siae_core::{Backup, BackupStatus};

use crate::backend::SiaeBackend;
use crate::notify::Notifier;
use crate::resource::Resource;

pub struct BackupsPage<B: SiaeBackend> {
    backend: B,
    pub records: Resource<Vec<Backup>>,
    pub triggering: bool,
    pub notifier: Notifier,
}

impl<B: SiaeBackend> BackupsPage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Resource::new(),
            triggering: false,
            notifier: Notifier::default(),
        }
    }

    pub async fn refresh(&mut self) {
        self.records.begin();
        let result = self.backend.list_backups().await;
        self.records.resolve(result);
    }

    /// Newest snapshot first.
    pub fn visible(&self) -> Vec<&Backup> {
        let mut view: Vec<&Backup> =
            self.records.value().map(Vec::as_slice).unwrap_or(&[]).iter().collect();
        view.sort_by_key(|b| std::cmp::Reverse(b.created_at));
        view
    }

    pub fn has_in_progress(&self) -> bool {
        self.records
            .value()
            .is_some_and(|records| records.iter().any(|b| b.status == BackupStatus::InProgress))
    }

    pub fn can_trigger(&self) -> bool {
        !self.triggering && !self.has_in_progress()
    }

    pub async fn trigger(&mut self) -> bool {
        if !self.can_trigger() {
            self.notifier.warning("A backup is already in progress.");
            return false;
        }

        self.triggering = true;
        let result = self.backend.trigger_backup().await;
        self.triggering = false;
        match result {
            Ok(()) => {
                self.refresh().await;
                self.notifier.success("Backup started.");
                true
            }
            Err(err) => {
                self.notifier.error(err.user_message("Could not start the backup."));
                false
            }
        }
    }

    /// Only successful snapshots can be downloaded.
    pub fn download_url(&self, backup: &Backup) -> Option<String> {
        (backup.status == BackupStatus::Success)
            .then(|| self.backend.backup_download_url(backup.id))
    }
}
