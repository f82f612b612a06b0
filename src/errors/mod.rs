//! Error handling module for the shoe catalog.
//!
//! Provides the error taxonomy shared by validation, the remote client and the catalog store,
//! each with a stable error code for the presentation layer.

use std::fmt;

use thiserror::Error;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const REMOTE_READ_ERROR: &str = "REMOTE_READ_ERROR";
    pub const REMOTE_WRITE_ERROR: &str = "REMOTE_WRITE_ERROR";
    pub const UNREACHABLE: &str = "UNREACHABLE";
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const BAD_STATUS: &str = "BAD_STATUS";
    pub const MALFORMED_RESPONSE: &str = "MALFORMED_RESPONSE";
    pub const HTTP_ERROR: &str = "HTTP_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// What is wrong with a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// Field absent or null where a value is required.
    Missing,
    /// Expected text, got another JSON type.
    NotText,
    /// Text shorter than the rule allows (measured in characters, surrounding whitespace ignored).
    TooShort { min_len: usize },
    /// Value could not be coerced to a number.
    NotANumber,
    /// Number is zero or negative.
    NotPositive,
    /// Number too large, or too precise, to be held without rounding.
    OutOfRange,
    /// Value could not be coerced to a boolean.
    NotABoolean,
}

/// A rule violation on one named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub issue: FieldIssue,
}

impl FieldError {
    pub fn new(field: &'static str, issue: FieldIssue) -> Self {
        Self { field, issue }
    }

    /// Human-readable message suitable for inline display next to the field.
    pub fn message(&self) -> String {
        match &self.issue {
            FieldIssue::Missing => format!("{} is required", self.field),
            FieldIssue::NotText => format!("{} must be text", self.field),
            FieldIssue::TooShort { min_len: 1 } => format!("{} is required", self.field),
            FieldIssue::TooShort { min_len } => {
                format!("{} must be at least {} characters", self.field, min_len)
            }
            FieldIssue::NotANumber => format!("{} must be a number", self.field),
            FieldIssue::NotPositive => format!("{} must be positive", self.field),
            FieldIssue::OutOfRange => format!("{} is out of range", self.field),
            FieldIssue::NotABoolean => format!("{} must be true or false", self.field),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Draft input violates one or more field rules. Never reaches the remote layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Every violated field, in rule-table order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The violation for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(FieldError::message).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Underlying network/HTTP failure talking to the remote catalog.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not connect to the remote store.
    #[error("remote unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The transport gave up waiting.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Remote answered with a non-2xx status.
    #[error("remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Any other HTTP client failure.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),
}

impl TransportError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::Unreachable(_) => codes::UNREACHABLE,
            TransportError::Timeout(_) => codes::TIMEOUT,
            TransportError::Status { .. } => codes::BAD_STATUS,
            TransportError::Malformed(_) => codes::MALFORMED_RESPONSE,
            TransportError::Http(_) => codes::HTTP_ERROR,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err)
        } else if err.is_connect() {
            TransportError::Unreachable(err)
        } else if err.is_decode() {
            TransportError::Malformed(err.to_string())
        } else {
            TransportError::Http(err)
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Malformed(format!("JSON error: {}", err))
    }
}

/// Error surfaced by `CatalogStore` operations.
///
/// When `RemoteWrite` is returned from a mutating operation the in-memory collection is
/// exactly as it was before the call.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("shoe {0} not found")]
    NotFound(String),

    #[error("remote read failed: {0}")]
    RemoteRead(#[source] TransportError),

    #[error("remote write failed: {0}")]
    RemoteWrite(#[source] TransportError),
}

impl CatalogError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Validation(_) => codes::VALIDATION_ERROR,
            CatalogError::NotFound(_) => codes::NOT_FOUND,
            CatalogError::RemoteRead(_) => codes::REMOTE_READ_ERROR,
            CatalogError::RemoteWrite(_) => codes::REMOTE_WRITE_ERROR,
        }
    }

    /// The transport failure behind a remote error.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            CatalogError::RemoteRead(e) | CatalogError::RemoteWrite(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("invalid SHOE_LOG_FORMAT {0:?}, expected \"pretty\" or \"json\"")]
    InvalidLogFormat(String),

    #[error("SHOE_API_KEY contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        codes::CONFIG_ERROR
    }
}
