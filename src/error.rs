//! Unified error hierarchy for liftrs
//!
//! The plan engine itself has no error paths: malformed history is skipped
//! and input validation is the caller's job. These types cover the layers
//! around it (input validation, file import/export). Config loading
//! reports through `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all liftrs operations
#[derive(Debug, Error)]
pub enum LiftError {
    /// One-rep-max input rejected before plan generation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Lift name that does not map to squat, bench, deadlift or press
    #[error("Unknown lift: {0}")]
    UnknownLift(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Export specific errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Unsupported output format
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Writing the output failed
    #[error("Export failed to {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// Result type alias for liftrs operations
pub type Result<T> = std::result::Result<T, LiftError>;

impl LiftError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LiftError::InvalidInput(_) => ErrorSeverity::Warning,
            LiftError::UnknownLift(_) => ErrorSeverity::Info,
            LiftError::Io(_) | LiftError::Serialization(_) | LiftError::Export(_) => {
                ErrorSeverity::Error
            }
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LiftError::InvalidInput(_) => "All lifts must have values greater than 0".to_string(),
            LiftError::Serialization(e) => format!("Could not read workout data: {}", e),
            LiftError::Export(ExportError::WriteFailed { path, .. }) => {
                format!("Could not write output file: {}", path.display())
            }
            _ => self.to_string(),
        }
    }

    /// Emit this error at the level its severity calls for
    pub fn log(&self) {
        match self.severity() {
            ErrorSeverity::Error => tracing::error!(error = %self, "Operation failed"),
            ErrorSeverity::Warning => tracing::warn!(error = %self, "Operation rejected"),
            ErrorSeverity::Info => tracing::info!(error = %self, "Input ignored"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}
