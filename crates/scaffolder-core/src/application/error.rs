//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not validation.
//! Validation errors are `DomainError` from `crate::domain`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::application::services::ScaffoldStep;
use crate::error::{ErrorCategory, ScaffolderError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A scaffolding step failed; later steps were not attempted.
    #[error("{step} failed: {source}")]
    StepFailed {
        step: ScaffoldStep,
        #[source]
        source: Box<ScaffolderError>,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: failed to {operation}: {reason}")]
    FilesystemError {
        path: PathBuf,
        operation: &'static str,
        kind: io::ErrorKind,
        reason: String,
    },

    /// An external tool could not be started or exited unsuccessfully.
    #[error("External command `{command}` failed: {reason}")]
    ExternalCommand { command: String, reason: String },
}

impl ApplicationError {
    /// Wrap an I/O error with the path and operation that produced it.
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, err: &io::Error) -> Self {
        Self::FilesystemError {
            path: path.into(),
            operation,
            kind: err.kind(),
            reason: err.to_string(),
        }
    }

    /// Path of the entry that failed, following step wrappers.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::FilesystemError { path, .. } => Some(path),
            Self::StepFailed { source, .. } => match source.as_ref() {
                ScaffolderError::Application(inner) => inner.path(),
                _ => None,
            },
            Self::ExternalCommand { .. } => None,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StepFailed { step, source } => {
                let mut suggestions = vec![format!("The {step} step did not complete")];
                suggestions.extend(source.suggestions());
                suggestions
            }
            Self::FilesystemError { path, kind, .. } => match kind {
                io::ErrorKind::NotFound => vec![
                    format!("Not found: {}", path.display()),
                    "Check that the template contains this path".into(),
                ],
                io::ErrorKind::PermissionDenied => vec![
                    format!("Permission denied: {}", path.display()),
                    "Check that you have read and write permissions".into(),
                ],
                _ => vec![
                    format!("Failed to access: {}", path.display()),
                    "Check available disk space and permissions".into(),
                ],
            },
            Self::ExternalCommand { command, .. } => vec![
                format!("Ensure `{command}` is installed and in your PATH"),
                "Check the command output above for details".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StepFailed { source, .. } => source.category(),
            Self::FilesystemError { kind, .. } if *kind == io::ErrorKind::NotFound => {
                ErrorCategory::NotFound
            }
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::ExternalCommand { .. } => ErrorCategory::External,
        }
    }
}
