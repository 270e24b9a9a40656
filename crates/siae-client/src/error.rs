use serde::Deserialize;
use thiserror::Error;

use siae_core::FormError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("resource not found")]
    NotFound,
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Error body shape used by the backend for rejected requests.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Build a server error from a response body, preferring the backend's
    /// `message` field over the raw text.
    pub(crate) fn from_body(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);
        ApiError::Server { status, message }
    }

    /// The transfer flow surfaces a distinguished message when the backend
    /// rejects signing because no digital certificate is configured.
    pub fn is_missing_certificate(&self) -> bool {
        matches!(self, ApiError::Server { message, .. } if message.contains("Certificado"))
    }

    /// Backend-supplied message when present, else a generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
