//! Filtered and sorted projection of the process list.
//!
//! The full fetched collection stays untouched; every render derives a fresh
//! ordered view from the current criteria. Active processes sort before
//! finalized/cancelled ones, newest id first within each group.

use chrono::NaiveDate;

use crate::model::{Process, ProcessStatus};

/// Which date column the date filter compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateField {
    #[default]
    Opened,
    Closed,
}

/// Ephemeral, UI-only filter state. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Free-text term matched against beneficiary, id, and sector.
    pub term: String,
    pub status: Option<ProcessStatus>,
    pub date: Option<NaiveDate>,
    pub date_field: DateField,
}

impl FilterCriteria {
    /// Reset everything except the date-field toggle.
    pub fn clear(&mut self) {
        self.term.clear();
        self.status = None;
        self.date = None;
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.status.is_none() && self.date.is_none()
    }

    fn matches(&self, proc: &Process) -> bool {
        let term = self.term.to_lowercase();
        let matches_term = term.is_empty()
            || proc.beneficiary.to_lowercase().contains(&term)
            || proc.id.to_string().contains(&term)
            || proc.sector.wire_name().to_lowercase().contains(&term);

        let matches_status = self.status.is_none_or(|s| proc.status == s);

        let matches_date = self.date.is_none_or(|d| {
            let target = match self.date_field {
                DateField::Opened => proc.opened_on,
                DateField::Closed => proc.closed_on,
            };
            target == Some(d)
        });

        matches_term && matches_status && matches_date
    }
}

/// Derive the display order for the process table.
///
/// Pure and stable; an empty result is a normal outcome rendered by callers
/// as a placeholder row.
pub fn project<'a>(records: &'a [Process], criteria: &FilterCriteria) -> Vec<&'a Process> {
    let mut view: Vec<&Process> = records.iter().filter(|p| criteria.matches(p)).collect();
    view.sort_by_key(|p| (p.status.is_terminal(), std::cmp::Reverse(p.id)));
    view
}
