//! Local filesystem adapter using std::fs and walkdir.

use std::fs;
use std::io;
use std::path::Path;

use scaffolder_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, TreeWalk},
    },
    domain::{EntryKind, FileMode, TreeEntry},
    error::{ScaffolderError, ScaffolderResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn walk<'a>(&'a self, root: &Path) -> TreeWalk<'a> {
        let root = root.to_path_buf();
        // Sorted by file name so every run visits entries in the same order.
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Box::new(walker.map(move |entry| {
            let entry = entry.map_err(|e| map_walk_error(&root, e))?;
            let file_type = entry.file_type();
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };

            let mode = match kind {
                EntryKind::Other => FileMode::DEFAULT,
                _ => {
                    let metadata = entry.metadata().map_err(|e| map_walk_error(&root, e))?;
                    mode_of(&metadata)
                }
            };

            Ok(TreeEntry::new(entry.into_path(), kind, mode))
        }))
    }

    fn read_file(&self, path: &Path) -> ScaffolderResult<Vec<u8>> {
        fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8], mode: FileMode) -> ScaffolderResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))?;
        // `fs::write` keeps an existing file's mode, but the umask applies to
        // new files; set it explicitly either way.
        self.set_mode(path, mode)
    }

    fn set_mode(&self, path: &Path, mode: FileMode) -> ScaffolderResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        {
            // No mode bits; only the read-only flag maps across.
            let metadata = fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            perms.set_readonly(mode.bits() & 0o200 == 0);
            fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        Ok(())
    }

    fn entry_kind(&self, path: &Path) -> ScaffolderResult<Option<EntryKind>> {
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io_error(path, e, "read metadata")),
        };
        let file_type = metadata.file_type();
        Ok(Some(if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }))
    }

    fn remove_dir_all(&self, path: &Path) -> ScaffolderResult<()> {
        fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_file(&self, path: &Path) -> ScaffolderResult<()> {
        fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }
}

#[cfg(unix)]
fn mode_of(metadata: &fs::Metadata) -> FileMode {
    use std::os::unix::fs::PermissionsExt;
    FileMode::new(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn mode_of(metadata: &fs::Metadata) -> FileMode {
    if metadata.permissions().readonly() {
        FileMode::new(0o444)
    } else {
        FileMode::DEFAULT
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &'static str) -> ScaffolderError {
    ApplicationError::io(path, operation, &e).into()
}

fn map_walk_error(root: &Path, e: walkdir::Error) -> ScaffolderError {
    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
    let kind = e.io_error().map_or(io::ErrorKind::Other, io::Error::kind);
    ApplicationError::FilesystemError {
        path,
        operation: "walk directory",
        kind,
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn collect(fs: &LocalFilesystem, root: &Path) -> Vec<(PathBuf, EntryKind)> {
        fs.walk(root)
            .map(|e| {
                let e = e.unwrap();
                (e.path.strip_prefix(root).unwrap().to_path_buf(), e.kind)
            })
            .collect()
    }

    #[test]
    fn walk_is_sorted_and_includes_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::write(root.join("c.txt"), "c").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b/inner/d.txt"), "d").unwrap();

        let entries = collect(&LocalFilesystem::new(), root);
        assert_eq!(
            entries,
            [
                (PathBuf::new(), EntryKind::Directory),
                (PathBuf::from("a.txt"), EntryKind::File),
                (PathBuf::from("b"), EntryKind::Directory),
                (PathBuf::from("b/inner"), EntryKind::Directory),
                (PathBuf::from("b/inner/d.txt"), EntryKind::File),
                (PathBuf::from("c.txt"), EntryKind::File),
            ]
        );
    }

    #[test]
    fn walk_of_missing_root_yields_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let first = LocalFilesystem::new().walk(&missing).next().unwrap();
        let err = first.unwrap_err();
        assert!(err.to_string().contains("walk directory"));
    }

    #[test]
    #[cfg(unix)]
    fn write_file_applies_mode() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.sh");
        let fs_adapter = LocalFilesystem::new();

        fs_adapter
            .write_file(&path, b"#!/bin/sh\n", FileMode::new(0o750))
            .unwrap();

        let mode = mode_of(&fs::metadata(&path).unwrap());
        assert_eq!(mode, FileMode::new(0o750));
        assert_eq!(fs::read(&path).unwrap(), b"#!/bin/sh\n");
    }

    #[test]
    #[cfg(unix)]
    fn symlinks_are_reported_as_other() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("target.txt"), "t").unwrap();
        std::os::unix::fs::symlink(root.join("target.txt"), root.join("link")).unwrap();

        let entries = collect(&LocalFilesystem::new(), root);
        assert!(entries.contains(&(PathBuf::from("link"), EntryKind::Other)));
    }

    #[test]
    fn set_mode_on_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .set_mode(&temp.path().join("missing.sh"), FileMode::EXECUTABLE)
            .unwrap_err();
        assert_eq!(
            err.category(),
            scaffolder_core::error::ErrorCategory::NotFound
        );
    }

    #[test]
    fn remove_helpers() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::write(root.join("go.sum"), "sum").unwrap();
        let fs_adapter = LocalFilesystem::new();

        assert_eq!(
            fs_adapter.entry_kind(&root.join(".git")).unwrap(),
            Some(EntryKind::Directory)
        );
        assert_eq!(
            fs_adapter.entry_kind(&root.join("go.sum")).unwrap(),
            Some(EntryKind::File)
        );
        fs_adapter.remove_dir_all(&root.join(".git")).unwrap();
        fs_adapter.remove_file(&root.join("go.sum")).unwrap();
        assert_eq!(fs_adapter.entry_kind(&root.join(".git")).unwrap(), None);
        assert_eq!(fs_adapter.entry_kind(&root.join("go.sum")).unwrap(), None);
    }

    #[test]
    #[cfg(unix)]
    fn entry_kind_reports_errors_other_than_absence() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("plain"), "x").unwrap();

        // A path through a regular file fails with ENOTDIR, not ENOENT.
        let err = LocalFilesystem::new()
            .entry_kind(&temp.path().join("plain/.git"))
            .unwrap_err();
        assert!(err.to_string().contains("read metadata"));
    }
}
