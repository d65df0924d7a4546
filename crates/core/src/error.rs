//! Error types for set-union operations.

/// Errors that can occur while preparing or running a release.
#[derive(Debug, thiserror::Error)]
pub enum DpsuError {
    /// Invalid privacy parameter provided.
    #[error("invalid parameter: {msg}")]
    InvalidParameters {
        /// Human-readable error description.
        msg: String,
    },

    /// Numerical computation left its domain.
    #[error("numerical error: {msg}")]
    NumericalError {
        /// Human-readable error description.
        msg: String,
    },
}

/// Result type for set-union operations.
pub type Result<T> = std::result::Result<T, DpsuError>;

impl DpsuError {
    /// Create an invalid parameter error.
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameters { msg: msg.into() }
    }

    /// Create a numerical error.
    pub fn numerical<S: Into<String>>(msg: S) -> Self {
        Self::NumericalError { msg: msg.into() }
    }
}
