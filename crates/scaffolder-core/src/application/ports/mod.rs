//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `scaffolder-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Tree walking, file reads and writes, permissions
//!   - `TemplateCloner`: Fetching the template repository
//!   - `DependencyTidier`: Finalising the new project's dependencies
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{DependencyTidier, Filesystem, TemplateCloner, TreeWalk};
