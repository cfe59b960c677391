//! Tree Rewriter - applies the substitution engine to a whole directory.
//!
//! Every regular file under the root is read, rewritten and written back with
//! its original mode bits. The first error aborts the walk: files visited
//! before it stay rewritten, files after it are never touched. There is no
//! rollback.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, trace};

use crate::{
    application::ports::Filesystem,
    domain::{EntryKind, FileRewriteResult, RewriteSummary, TemplateDescriptor, TreeEntry},
    error::ScaffolderResult,
};

/// Rewrites placeholder aliases across a directory tree.
pub struct TreeRewriter {
    filesystem: Arc<dyn Filesystem>,
}

impl TreeRewriter {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Rewrite every regular file under `root` using `descriptor`'s bindings.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn rewrite_tree(
        &self,
        root: &Path,
        descriptor: &TemplateDescriptor,
    ) -> ScaffolderResult<RewriteSummary> {
        let mut summary = RewriteSummary::default();

        for entry in self.filesystem.walk(root) {
            let entry = entry?;
            match entry.kind {
                EntryKind::Directory => summary.directories += 1,
                EntryKind::Other => {
                    debug!(path = %entry.path.display(), "Skipping non-regular entry");
                    summary.skipped += 1;
                }
                EntryKind::File => self.rewrite_file(entry, descriptor, &mut summary)?,
            }
        }

        info!(
            files = summary.files,
            changed = summary.changed,
            empty = summary.empty,
            skipped = summary.skipped,
            "Tokens replaced"
        );
        Ok(summary)
    }

    fn rewrite_file(
        &self,
        entry: TreeEntry,
        descriptor: &TemplateDescriptor,
        summary: &mut RewriteSummary,
    ) -> ScaffolderResult<()> {
        summary.files += 1;

        let original = self.filesystem.read_file(&entry.path)?;
        if original.is_empty() {
            debug!(path = %entry.path.display(), "File is empty");
            summary.empty += 1;
            return Ok(());
        }

        let result = FileRewriteResult::compute(entry.path, &original, entry.mode, descriptor);
        if !result.changed {
            return Ok(());
        }

        self.filesystem
            .write_file(&result.path, &result.content, result.mode)?;
        summary.changed += 1;
        trace!(path = %result.path.display(), mode = %result.mode, "File rewritten");
        Ok(())
    }
}
