//! Thin HTTP access layer over the SIAE backend REST API.
//!
//! No retry, no caching, no auth token handling; every call maps a single
//! endpoint and converts non-2xx responses into [`ApiError`].

pub mod error;
pub mod http;

pub use error::ApiError;
pub use http::ApiClient;
