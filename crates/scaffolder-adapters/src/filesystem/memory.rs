//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    io,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use scaffolder_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, TreeWalk},
    },
    domain::{EntryKind, FileMode, TreeEntry},
    error::{ScaffolderError, ScaffolderResult},
};

const DIR_MODE: FileMode = FileMode::new(0o755);

/// In-memory filesystem for testing.
///
/// Cloning shares the underlying tree, so a test can hand one clone to a
/// service and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: BTreeMap<PathBuf, Node>,
    reads: Vec<PathBuf>,
    deny_read: HashSet<PathBuf>,
    deny_write: HashSet<PathBuf>,
    fail_walk_at: HashSet<PathBuf>,
    deny_stat: HashSet<PathBuf>,
}

#[derive(Debug, Clone)]
enum Node {
    Dir { mode: FileMode },
    File { content: Vec<u8>, mode: FileMode },
    Symlink,
}

impl Node {
    fn kind(&self) -> EntryKind {
        match self {
            Self::Dir { .. } => EntryKind::Directory,
            Self::File { .. } => EntryKind::File,
            Self::Symlink => EntryKind::Other,
        }
    }

    fn mode(&self) -> FileMode {
        match self {
            Self::Dir { mode } | Self::File { mode, .. } => *mode,
            Self::Symlink => FileMode::DEFAULT,
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a directory and any missing parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let mut inner = self.state_mut();
        insert_parents(&mut inner.nodes, path.as_ref(), true);
        self
    }

    /// Create or replace a file, creating missing parent directories.
    pub fn add_file(
        &self,
        path: impl AsRef<Path>,
        content: impl AsRef<[u8]>,
        mode: FileMode,
    ) -> &Self {
        let path = path.as_ref();
        let mut inner = self.state_mut();
        insert_parents(&mut inner.nodes, path, false);
        inner.nodes.insert(
            path.to_path_buf(),
            Node::File {
                content: content.as_ref().to_vec(),
                mode,
            },
        );
        self
    }

    /// Create a symbolic link entry. Its target is not tracked.
    pub fn add_symlink(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        let mut inner = self.state_mut();
        insert_parents(&mut inner.nodes, path, false);
        inner.nodes.insert(path.to_path_buf(), Node::Symlink);
        self
    }

    /// Content of a file, if it exists.
    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.state().nodes.get(path.as_ref()) {
            Some(Node::File { content, .. }) => Some(content.clone()),
            _ => None,
        }
    }

    /// Mode of a file or directory, if it exists.
    pub fn mode(&self, path: impl AsRef<Path>) -> Option<FileMode> {
        self.state().nodes.get(path.as_ref()).map(Node::mode)
    }

    /// All regular file paths, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.state()
            .nodes
            .iter()
            .filter(|(_, node)| matches!(node, Node::File { .. }))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Every path passed to `read_file`, in call order.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.state().reads.clone()
    }

    /// Make `read_file` fail with `PermissionDenied` for `path`.
    pub fn deny_read(&self, path: impl Into<PathBuf>) {
        self.state_mut().deny_read.insert(path.into());
    }

    /// Make `write_file` and `set_mode` fail with `PermissionDenied` for `path`.
    pub fn deny_write(&self, path: impl Into<PathBuf>) {
        self.state_mut().deny_write.insert(path.into());
    }

    /// Make `entry_kind` fail with `PermissionDenied` for `path`.
    pub fn deny_stat(&self, path: impl Into<PathBuf>) {
        self.state_mut().deny_stat.insert(path.into());
    }

    /// Yield a traversal error in place of the entry at `path`.
    pub fn fail_walk_at(&self, path: impl Into<PathBuf>) {
        self.state_mut().fail_walk_at.insert(path.into());
    }
}

fn insert_parents(nodes: &mut BTreeMap<PathBuf, Node>, path: &Path, include_self: bool) {
    let mut current = PathBuf::new();
    let components: Vec<_> = path.components().collect();
    let count = if include_self {
        components.len()
    } else {
        components.len().saturating_sub(1)
    };
    for component in components.into_iter().take(count) {
        current.push(component);
        nodes
            .entry(current.clone())
            .or_insert(Node::Dir { mode: DIR_MODE });
    }
}

fn error(path: &Path, operation: &'static str, kind: io::ErrorKind) -> ScaffolderError {
    let reason = match kind {
        io::ErrorKind::NotFound => "no such file or directory",
        io::ErrorKind::PermissionDenied => "permission denied",
        _ => "unsupported entry",
    };
    ApplicationError::io(path, operation, &io::Error::new(kind, reason)).into()
}

impl Filesystem for MemoryFilesystem {
    fn walk<'a>(&'a self, root: &Path) -> TreeWalk<'a> {
        let inner = self.state();
        if !inner.nodes.contains_key(root) {
            let err = error(root, "walk directory", io::ErrorKind::NotFound);
            return Box::new(std::iter::once(Err(err)));
        }

        // Snapshot so the walk does not hold the lock while callers write.
        let entries: Vec<ScaffolderResult<TreeEntry>> = inner
            .nodes
            .range(root.to_path_buf()..)
            .take_while(|(path, _)| path.starts_with(root))
            .map(|(path, node)| {
                if inner.fail_walk_at.contains(path) {
                    Err(error(path, "walk directory", io::ErrorKind::PermissionDenied))
                } else {
                    Ok(TreeEntry::new(path.clone(), node.kind(), node.mode()))
                }
            })
            .collect();

        Box::new(entries.into_iter())
    }

    fn read_file(&self, path: &Path) -> ScaffolderResult<Vec<u8>> {
        let mut inner = self.state_mut();
        inner.reads.push(path.to_path_buf());
        if inner.deny_read.contains(path) {
            return Err(error(path, "read file", io::ErrorKind::PermissionDenied));
        }
        match inner.nodes.get(path) {
            Some(Node::File { content, .. }) => Ok(content.clone()),
            Some(_) => Err(error(path, "read file", io::ErrorKind::Other)),
            None => Err(error(path, "read file", io::ErrorKind::NotFound)),
        }
    }

    fn write_file(&self, path: &Path, content: &[u8], mode: FileMode) -> ScaffolderResult<()> {
        let mut inner = self.state_mut();
        if inner.deny_write.contains(path) {
            return Err(error(path, "write file", io::ErrorKind::PermissionDenied));
        }
        let parent_ok = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .is_none_or(|p| matches!(inner.nodes.get(p), Some(Node::Dir { .. })));
        if !parent_ok {
            return Err(error(path, "write file", io::ErrorKind::NotFound));
        }
        inner.nodes.insert(
            path.to_path_buf(),
            Node::File {
                content: content.to_vec(),
                mode,
            },
        );
        Ok(())
    }

    fn set_mode(&self, path: &Path, mode: FileMode) -> ScaffolderResult<()> {
        let mut inner = self.state_mut();
        if inner.deny_write.contains(path) {
            return Err(error(path, "set permissions", io::ErrorKind::PermissionDenied));
        }
        match inner.nodes.get_mut(path) {
            Some(Node::Dir { mode: current } | Node::File { mode: current, .. }) => {
                *current = mode;
                Ok(())
            }
            Some(Node::Symlink) => Err(error(path, "set permissions", io::ErrorKind::Other)),
            None => Err(error(path, "set permissions", io::ErrorKind::NotFound)),
        }
    }

    fn entry_kind(&self, path: &Path) -> ScaffolderResult<Option<EntryKind>> {
        let inner = self.state();
        if inner.deny_stat.contains(path) {
            return Err(error(path, "read metadata", io::ErrorKind::PermissionDenied));
        }
        Ok(inner.nodes.get(path).map(Node::kind))
    }

    fn remove_dir_all(&self, path: &Path) -> ScaffolderResult<()> {
        let mut inner = self.state_mut();
        match inner.nodes.get(path) {
            Some(Node::Dir { .. }) => {
                inner.nodes.retain(|p, _| !p.starts_with(path));
                Ok(())
            }
            Some(_) => Err(error(path, "remove directory", io::ErrorKind::Other)),
            None => Err(error(path, "remove directory", io::ErrorKind::NotFound)),
        }
    }

    fn remove_file(&self, path: &Path) -> ScaffolderResult<()> {
        let mut inner = self.state_mut();
        match inner.nodes.get(path) {
            Some(Node::File { .. } | Node::Symlink) => {
                inner.nodes.remove(path);
                Ok(())
            }
            Some(Node::Dir { .. }) => Err(error(path, "remove file", io::ErrorKind::Other)),
            None => Err(error(path, "remove file", io::ErrorKind::NotFound)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffolder_core::error::ErrorCategory;

    fn sample() -> MemoryFilesystem {
        let fs = MemoryFilesystem::new();
        fs.add_file("proj/c.txt", "c", FileMode::DEFAULT)
            .add_file("proj/a.txt", "a", FileMode::DEFAULT)
            .add_file("proj/b/inner/d.txt", "d", FileMode::EXECUTABLE)
            .add_file("other/x.txt", "x", FileMode::DEFAULT);
        fs
    }

    #[test]
    fn walk_is_sorted_and_scoped_to_root() {
        let fs = sample();
        let paths: Vec<_> = fs
            .walk(Path::new("proj"))
            .map(|e| e.unwrap().path)
            .collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("proj"),
                PathBuf::from("proj/a.txt"),
                PathBuf::from("proj/b"),
                PathBuf::from("proj/b/inner"),
                PathBuf::from("proj/b/inner/d.txt"),
                PathBuf::from("proj/c.txt"),
            ]
        );
    }

    #[test]
    fn walk_of_missing_root_is_not_found() {
        let fs = sample();
        let mut walk = fs.walk(Path::new("missing"));
        let err = walk.next().unwrap().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(walk.next().is_none());
    }

    #[test]
    fn fail_walk_at_replaces_entry_with_error() {
        let fs = sample();
        fs.fail_walk_at("proj/b");
        let results: Vec<_> = fs.walk(Path::new("proj")).collect();
        assert!(results[2].is_err());
        assert!(results[3].is_ok());
    }

    #[test]
    fn read_and_write_keep_modes() {
        let fs = sample();
        let path = Path::new("proj/b/inner/d.txt");
        assert_eq!(fs.read_file(path).unwrap(), b"d");
        fs.write_file(path, b"dd", FileMode::EXECUTABLE).unwrap();
        assert_eq!(fs.read(path).unwrap(), b"dd");
        assert_eq!(fs.mode(path), Some(FileMode::EXECUTABLE));
        assert_eq!(fs.reads(), [path.to_path_buf()]);
    }

    #[test]
    fn denied_read_is_recorded_and_fails() {
        let fs = sample();
        fs.deny_read("proj/a.txt");
        let err = fs.read_file(Path::new("proj/a.txt")).unwrap_err();
        assert!(err.to_string().contains("proj/a.txt"));
        assert_eq!(fs.reads().len(), 1);
    }

    #[test]
    fn write_requires_parent_directory() {
        let fs = sample();
        let err = fs
            .write_file(Path::new("nowhere/f.txt"), b"x", FileMode::DEFAULT)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn remove_dir_all_drops_descendants() {
        let fs = sample();
        fs.remove_dir_all(Path::new("proj/b")).unwrap();
        assert_eq!(fs.entry_kind(Path::new("proj/b/inner/d.txt")).unwrap(), None);
        assert_eq!(
            fs.entry_kind(Path::new("proj/a.txt")).unwrap(),
            Some(EntryKind::File)
        );
        assert!(fs.remove_file(Path::new("proj/b")).is_err());
    }

    #[test]
    fn denied_stat_fails_entry_kind() {
        let fs = sample();
        fs.deny_stat("proj/a.txt");
        let err = fs.entry_kind(Path::new("proj/a.txt")).unwrap_err();
        assert!(err.to_string().contains("proj/a.txt"));
        assert_eq!(fs.entry_kind(Path::new("proj/c.txt")).unwrap(), Some(EntryKind::File));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        other.add_file("f.txt", "x", FileMode::DEFAULT);
        assert_eq!(fs.files(), [PathBuf::from("f.txt")]);
    }
}
