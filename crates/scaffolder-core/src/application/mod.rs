//! Application layer for Scaffolder.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TreeRewriter, ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences I/O around the domain layer but contains
//! no substitution logic itself. That lives in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{ScaffoldPlan, ScaffoldReport, ScaffoldService, ScaffoldStep, TreeRewriter};

// Re-export port traits (for adapter implementation)
pub use ports::{DependencyTidier, Filesystem, TemplateCloner};

pub use error::ApplicationError;
