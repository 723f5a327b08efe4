//! Error type shared by the library crates.

use thiserror::Error;

/// Errors raised by the glyph and particle engines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed input handed to a public operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A construction-time invariant was broken. Always a programming defect.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
