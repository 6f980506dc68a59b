//! # Error Taxonomy
//!
//! Shared error types for the client layers. Transport and status
//! failures are kept distinct so the session layer can react to
//! authorization problems and forms can report field-level issues
//! separately from network ones.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Errors surfaced by the REST API adapter.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connect, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the session. Callers clear the session and
    /// send the user back to login.
    #[error("not authorized (status {status})")]
    Unauthorized { status: u16 },

    /// Any other non-success status, with the server message when one
    /// could be extracted from the body.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The body did not match the expected envelope.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the caller should treat the session as expired.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Errors surfaced by the remote image store adapter.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image upload failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store rejected the file (type, size, preset).
    #[error("image store rejected the upload (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("image store response had no secure URL")]
    MissingUrl,

    /// The upload task was torn down before settling.
    #[error("image upload did not complete")]
    Interrupted,
}

/// Per-field validation messages, keyed by field name. Ordered so error
/// reporting is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Failure modes of one form submission. Each variant leaves the form in
/// a usable, re-triable state.
#[derive(Debug, Error)]
pub enum FormError {
    /// Validation failed before any network call.
    #[error("form has invalid fields: {0}")]
    Invalid(FieldErrors),

    /// One of the image uploads failed; the mutation never ran.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The mutation itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
