#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl LifecycleError {
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::PreconditionFailed(_))
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, LifecycleError>;
