// ============================================================================
// domain/error.rs - VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

use super::Placeholder;

/// Root domain error type.
///
/// All errors are:
/// - Detected before any I/O happens
/// - Cloneable and comparable (tests match on them directly)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Descriptor Validation
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Registry Invariants
    // ========================================================================
    #[error("Placeholder '{placeholder}' has no aliases")]
    NoAliases { placeholder: Placeholder },

    #[error("Placeholder '{placeholder}' has an empty alias")]
    EmptyAlias { placeholder: Placeholder },

    #[error("Alias '{alias}' is claimed by both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: Placeholder,
        second: Placeholder,
    },

    #[error("Pattern for '{placeholder}' failed to compile: {reason}")]
    InvalidPattern {
        placeholder: Placeholder,
        reason: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => match *field {
                "module name" => vec![
                    "Provide the Go module path with --module-name".into(),
                    "Example: --module-name github.com/username/project-name".into(),
                ],
                "binary name" => vec![
                    "Provide the binary name with --bin-name".into(),
                    "Example: --bin-name my-service".into(),
                ],
                "source location" => vec![
                    "Provide the template repository with --template".into(),
                    "Or set defaults.template_url in your configuration".into(),
                ],
                _ => vec![format!("Provide a value for the {field}")],
            },
            Self::DuplicateAlias { alias, .. } => vec![
                format!("'{alias}' must denote exactly one placeholder"),
                "Remove the alias from one of the placeholders".into(),
            ],
            _ => vec!["The token registry is misconfigured; this is a bug".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::NoAliases { .. }
            | Self::EmptyAlias { .. }
            | Self::DuplicateAlias { .. }
            | Self::InvalidPattern { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
