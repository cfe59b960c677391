//! Scaffolder Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Scaffolder
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         scaffolder-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ScaffoldService, TreeRewriter)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: Filesystem, Cloner, Tidier)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    scaffolder-adapters (Infrastructure) │
//! │  (LocalFilesystem, GitCloner, GoModTidy)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (TokenRegistry, TemplateDescriptor,     │
//! │        substitution engine)             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scaffolder_core::prelude::*;
//!
//! # fn run(
//! #     filesystem: Arc<dyn Filesystem>,
//! #     cloner: Box<dyn TemplateCloner>,
//! #     tidier: Box<dyn DependencyTidier>,
//! # ) -> ScaffolderResult<()> {
//! let registry = Arc::new(TokenRegistry::standard());
//! let descriptor = TemplateDescriptor::builder(registry)
//!     .source_location("https://github.com/twistingmercury/go-basic-tmpl.git")
//!     .root_dir("my-service")
//!     .module_name("github.com/acme/my-service")
//!     .bin_name("my-service")
//!     .build()?;
//!
//! let service = ScaffoldService::new(filesystem, cloner, tidier);
//! service.scaffold(&descriptor)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ScaffoldPlan, ScaffoldReport, ScaffoldService, ScaffoldStep, TreeRewriter,
        ports::{DependencyTidier, Filesystem, TemplateCloner},
        services::scaffold_service::StepEvent,
    };
    pub use crate::domain::{
        FileMode, Placeholder, RewriteSummary, TemplateDescriptor, TokenRegistry, rewrite,
    };
    pub use crate::error::{ScaffolderError, ScaffolderResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
