use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Unix permission bits of a file (`st_mode & 0o7777`).
///
/// Carried unchanged from the original file to the rewritten one. On
/// platforms without mode bits adapters report [`FileMode::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileMode(u32);

impl FileMode {
    pub const DEFAULT: Self = Self(0o644);
    pub const EXECUTABLE: Self = Self(0o755);

    pub const fn new(bits: u32) -> Self {
        Self(bits & 0o7777)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl Default for FileMode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// Kind of an entry met while walking a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Symlinks, sockets, devices: never rewritten.
    Other,
}

/// One entry of a directory walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub mode: FileMode,
}

impl TreeEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, mode: FileMode) -> Self {
        Self {
            path: path.into(),
            kind,
            mode,
        }
    }
}

/// Counters for one tree rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteSummary {
    pub directories: usize,
    pub files: usize,
    pub changed: usize,
    pub empty: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_masks_file_type_bits() {
        // S_IFREG | 0755
        assert_eq!(FileMode::new(0o100755).bits(), 0o755);
    }

    #[test]
    fn display_is_octal() {
        assert_eq!(FileMode::new(0o755).to_string(), "0755");
    }
}
