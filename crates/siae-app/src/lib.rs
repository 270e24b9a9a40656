//! View-model layer of the SIAE client.
//!
//! Each screen owns its own fetched collections, filter/form state, and
//! in-flight flags; nothing is shared across screens, so two open pages can
//! observe different snapshots until each refetches. All backend access goes
//! through the [`backend::SiaeBackend`] seam so the models are testable
//! without a network.

pub mod backend;
pub mod backups;
pub mod certificate;
pub mod dashboard;
pub mod detail;
pub mod notify;
pub mod processes;
pub mod resource;
pub mod routes;
pub mod servers;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::SiaeBackend;
pub use notify::{Notification, Notifier, Severity};
pub use resource::{LoadState, Resource};
pub use routes::Route;
