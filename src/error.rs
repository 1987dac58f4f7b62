#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use thiserror::Error;

use crate::domain::LifecycleError;

/// Error code constants for type-safe error handling
pub mod code {
    pub const CLI_ERROR: &str = "CLI_ERROR";
    pub const NOTFOUND: &str = "NOTFOUND";
    pub const INVALID: &str = "INVALID";
    pub const PRECONDITION: &str = "PRECONDITION";
    pub const CONFLICT: &str = "CONFLICT";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const DEPENDENCY: &str = "DEPENDENCY";
    pub const INTERNAL: &str = "INTERNAL";
}

#[derive(Error, Debug)]
pub enum PortCallError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Concurrent modification: {0}")]
    Conflict(String),

    #[error("Gateway error: {0}")]
    GatewayError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortCallError {
    /// Returns the protocol error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            PortCallError::Unauthorized(_) => code::UNAUTHORIZED,
            PortCallError::ValidationFailed(_)
            | PortCallError::ConfigError(_)
            | PortCallError::SerializationError(_) => code::INVALID,
            PortCallError::PreconditionFailed(_) => code::PRECONDITION,
            PortCallError::NotFound(_) => code::NOTFOUND,
            PortCallError::Conflict(_) => code::CONFLICT,
            PortCallError::GatewayError(_) | PortCallError::IoError(_) => code::DEPENDENCY,
            PortCallError::DatabaseError(_)
            | PortCallError::SqlxError(_)
            | PortCallError::Internal(_) => code::INTERNAL,
        }
    }

    /// Returns the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PortCallError::ConfigError(_) => 2,
            PortCallError::DatabaseError(_) | PortCallError::SqlxError(_) => 3,
            PortCallError::Unauthorized(_) => 4,
            PortCallError::ValidationFailed(_) => 5,
            PortCallError::PreconditionFailed(_) => 6,
            PortCallError::IoError(_) => 7,
            PortCallError::SerializationError(_) => 8,
            PortCallError::Internal(_) => 9,
            PortCallError::NotFound(_) => 10,
            PortCallError::Conflict(_) => 11,
            PortCallError::GatewayError(_) => 12,
        }
    }
}

impl From<LifecycleError> for PortCallError {
    fn from(error: LifecycleError) -> Self {
        match error {
            LifecycleError::PreconditionFailed(message) => Self::PreconditionFailed(message),
            LifecycleError::ValidationFailed(message) => Self::ValidationFailed(message),
        }
    }
}

/// Protocol error codes as documented in the CLI
pub const ERROR_CODES: &[(&str, &str, &str)] = &[
    (
        code::CLI_ERROR,
        "Invalid CLI usage",
        "Run 'portcall --help' for valid options",
    ),
    (
        code::NOTFOUND,
        "Resource was not found",
        "List resources and verify identifier",
    ),
    (
        code::INVALID,
        "Invalid request payload",
        "Check dates are YYYY-MM-DD and all required fields are present",
    ),
    (
        code::PRECONDITION,
        "Operation not allowed in the current notification status",
        "Run portcall notification show to inspect current status",
    ),
    (
        code::CONFLICT,
        "Notification was modified concurrently",
        "Reload the notification and retry",
    ),
    (
        code::UNAUTHORIZED,
        "Operation not authorized",
        "Provide a valid bearer token via --token or PORTCALL_TOKEN",
    ),
    (
        code::DEPENDENCY,
        "Port data gateway unavailable",
        "Verify gateway_url and network connectivity",
    ),
    (
        code::INTERNAL,
        "Unexpected internal failure",
        "Inspect logs and retry command",
    ),
];

/// Get error code details (description and fix) for a given error code
pub fn get_error_info(error_code: &str) -> Option<(&'static str, &'static str)> {
    ERROR_CODES
        .iter()
        .find(|(code, _, _)| *code == error_code)
        .map(|(_, desc, fix)| (*desc, *fix))
}

pub type Result<T> = std::result::Result<T, PortCallError>;
