// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Scaffolder.
//!
//! This module contains pure substitution logic with no I/O. Reading and
//! writing files, walking trees and running external tools are handled via
//! ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable values**: The registry and descriptors never change after construction
//! - **Validated at construction**: No partially-valid descriptor exists
//!
pub mod descriptor;
pub mod error;
pub mod file;
pub mod placeholder;
pub mod registry;
pub mod substitution;

pub use descriptor::{
    DEFAULT_VENDOR_NAME, TemplateDescriptor, TemplateDescriptorBuilder, TokenBinding,
    default_description,
};
pub use error::{DomainError, ErrorCategory};
pub use file::{EntryKind, FileMode, RewriteSummary, TreeEntry};
pub use placeholder::Placeholder;
pub use registry::{AliasSet, TokenRegistry};
pub use substitution::{FileRewriteResult, rewrite};
