//! Shared async-resource state.
//!
//! Every screen used to re-implement the same fetch/loading/error triple;
//! this folds it into one abstraction. A failed load clears the loading flag
//! and records the error but leaves the previously loaded value untouched.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// One fetched value plus its load status and last error message.
#[derive(Debug, Clone, Default)]
pub struct Resource<T> {
    value: Option<T>,
    state: LoadState,
    error: Option<String>,
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self { value: None, state: LoadState::Idle, error: None }
    }

    /// Mark the resource as loading; the current value stays visible.
    pub fn begin(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Apply a fetch result.
    pub fn resolve<E: Display>(&mut self, result: Result<T, E>) {
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.state = LoadState::Success;
                self.error = None;
            }
            Err(err) => {
                self.state = LoadState::Error;
                self.error = Some(err.to_string());
            }
        }
    }

    /// Replace the value directly (e.g. with a server's authoritative response).
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
        self.state = LoadState::Success;
        self.error = None;
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_empty() {
        let resource: Resource<Vec<u32>> = Resource::new();
        assert_eq!(resource.state(), LoadState::Idle);
        assert!(resource.value().is_none());
        assert!(resource.last_error().is_none());
    }

    #[test]
    fn successful_resolve_replaces_value() {
        let mut resource = Resource::new();
        resource.begin();
        assert!(resource.is_loading());
        resource.resolve::<&str>(Ok(vec![1, 2]));
        assert_eq!(resource.state(), LoadState::Success);
        assert_eq!(resource.value(), Some(&vec![1, 2]));
    }

    #[test]
    fn failed_resolve_keeps_prior_value() {
        let mut resource = Resource::new();
        resource.resolve::<&str>(Ok(vec![1]));
        resource.begin();
        resource.resolve(Err("connection refused"));
        assert_eq!(resource.state(), LoadState::Error);
        assert!(!resource.is_loading());
        assert_eq!(resource.value(), Some(&vec![1]));
        assert_eq!(resource.last_error(), Some("connection refused"));
    }
}
