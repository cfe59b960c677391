//! Unified error handling for Scaffolder Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Scaffolder Core operations.
#[derive(Debug, Error, Clone)]
pub enum ScaffolderError {
    /// Errors from the domain layer (validation failures).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl ScaffolderError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// The scaffolding step that failed, if this error came from the orchestrator.
    pub fn failed_step(&self) -> Option<crate::application::ScaffoldStep> {
        match self {
            Self::Application(ApplicationError::StepFailed { step, .. }) => Some(*step),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// An external tool (git, go) failed.
    External,
    Internal,
}

/// Convenient result type alias.
pub type ScaffolderResult<T> = Result<T, ScaffolderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_validation() {
        let err: ScaffolderError = DomainError::MissingRequiredField {
            field: "binary name",
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.failed_step(), None);
    }

    #[test]
    fn external_command_category() {
        let err: ScaffolderError = ApplicationError::ExternalCommand {
            command: "git clone".into(),
            reason: "exit status: 128".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::External);
        assert!(err.suggestions().iter().any(|s| s.contains("git clone")));
    }
}
