//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `scaffolder-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{EntryKind, FileMode, TreeEntry};
use crate::error::ScaffolderResult;

/// Lazy, ordered stream of walk entries. A traversal error is yielded in
/// place of the entry that could not be read.
pub type TreeWalk<'a> = Box<dyn Iterator<Item = ScaffolderResult<TreeEntry>> + 'a>;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `scaffolder_adapters::filesystem::LocalFilesystem` (production)
/// - `scaffolder_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `walk` must be deterministic and yield every entry under the root
///   exactly once, the root itself included
/// - Errors carry the offending path (`ApplicationError::FilesystemError`)
pub trait Filesystem: Send + Sync {
    /// Enumerate `root` recursively.
    fn walk<'a>(&'a self, root: &Path) -> TreeWalk<'a>;

    /// Read a whole file.
    fn read_file(&self, path: &Path) -> ScaffolderResult<Vec<u8>>;

    /// Replace a file's content and leave it with exactly `mode`.
    fn write_file(&self, path: &Path, content: &[u8], mode: FileMode) -> ScaffolderResult<()>;

    /// Set permission bits.
    fn set_mode(&self, path: &Path, mode: FileMode) -> ScaffolderResult<()>;

    /// Kind of the entry at `path` without following symlinks, `None` if
    /// nothing is there. Failures other than absence are errors.
    fn entry_kind(&self, path: &Path) -> ScaffolderResult<Option<EntryKind>>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ScaffolderResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> ScaffolderResult<()>;
}

/// Port for materialising a template repository on disk.
///
/// Implemented by `scaffolder_adapters::process::GitCloner`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateCloner: Send + Sync {
    /// Make the template at `source` available at `destination`.
    fn clone_template(&self, source: &str, destination: &Path) -> ScaffolderResult<()>;
}

/// Port for finalising dependency metadata of the new project.
///
/// Implemented by `scaffolder_adapters::process::GoModTidy`.
#[cfg_attr(test, mockall::automock)]
pub trait DependencyTidier: Send + Sync {
    /// Run in `working_dir`, the root of the new project.
    fn tidy(&self, working_dir: &Path) -> ScaffolderResult<()>;
}
