//! Control-panel screen: per-status counts, most recent records, and the
//! infrastructure health card.

use chrono::NaiveDate;

use siae_core::{HealthStatus, Process, ProcessStatus};

use crate::backend::SiaeBackend;
use crate::resource::Resource;

/// Counts derived from the full process collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub total: usize,
    pub in_legal: usize,
    pub in_executive: usize,
    pub finalized: usize,
    pub cancelled: usize,
    /// Active processes whose due date has passed.
    pub overdue: usize,
}

impl ProcessStats {
    pub fn compute(records: &[Process], today: NaiveDate) -> Self {
        let mut stats = Self { total: records.len(), ..Default::default() };
        for process in records {
            match process.status {
                ProcessStatus::InProgressLegal => stats.in_legal += 1,
                ProcessStatus::InProgressExecutive => stats.in_executive += 1,
                ProcessStatus::Finalized => stats.finalized += 1,
                ProcessStatus::Cancelled => stats.cancelled += 1,
            }
            if process.is_active()
                && process.due_on.or_else(|| process.derived_due_date()).is_some_and(|d| d < today)
            {
                stats.overdue += 1;
            }
        }
        stats
    }

    pub fn active(&self) -> usize {
        self.in_legal + self.in_executive
    }
}

pub struct DashboardPage<B: SiaeBackend> {
    backend: B,
    pub processes: Resource<Vec<Process>>,
    pub health: Resource<HealthStatus>,
}

impl<B: SiaeBackend> DashboardPage<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, processes: Resource::new(), health: Resource::new() }
    }

    /// Loads the collection and the health probe; either may fail on its own.
    pub async fn refresh(&mut self) {
        self.processes.begin();
        let result = self.backend.list_processes().await;
        self.processes.resolve(result);

        self.health.begin();
        let result = self.backend.health().await;
        self.health.resolve(result);
    }

    pub fn stats(&self, today: NaiveDate) -> ProcessStats {
        let records = self.processes.value().map(Vec::as_slice).unwrap_or(&[]);
        ProcessStats::compute(records, today)
    }

    /// Latest five records by id, newest first.
    pub fn recent(&self) -> Vec<&Process> {
        let mut view: Vec<&Process> =
            self.processes.value().map(Vec::as_slice).unwrap_or(&[]).iter().collect();
        view.sort_by_key(|p| std::cmp::Reverse(p.id));
        view.truncate(5);
        view
    }

    /// A probe that never answered counts as down.
    pub fn is_degraded(&self) -> bool {
        match self.health.value() {
            Some(health) => !health.database.is_up || !health.minio.is_up,
            None => true,
        }
    }
}
