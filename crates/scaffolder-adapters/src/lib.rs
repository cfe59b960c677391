//! Infrastructure adapters for Scaffolder.
//!
//! This crate implements the ports defined in `scaffolder-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{GitCloner, GoModTidy};
