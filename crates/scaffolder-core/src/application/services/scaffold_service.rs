//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Clone the template repository into the root directory
//! 2. Sanitize: drop VCS metadata and dependency lock files
//! 3. Mark the build scripts executable
//! 4. Rewrite placeholder tokens across the tree
//! 5. Tidy the new project's dependencies
//!
//! Steps run strictly in sequence. The first failure aborts the run and is
//! reported as [`ApplicationError::StepFailed`] naming the step. Nothing is
//! retried or rolled back. Each step is also exposed on its own.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, TreeRewriter,
        ports::{DependencyTidier, Filesystem, TemplateCloner},
    },
    domain::{EntryKind, FileMode, RewriteSummary, TemplateDescriptor},
    error::ScaffolderResult,
};

/// One stage of a scaffolding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaffoldStep {
    Clone,
    Sanitize,
    MarkExecutable,
    Rewrite,
    Tidy,
}

impl ScaffoldStep {
    pub const ALL: [ScaffoldStep; 5] = [
        ScaffoldStep::Clone,
        ScaffoldStep::Sanitize,
        ScaffoldStep::MarkExecutable,
        ScaffoldStep::Rewrite,
        ScaffoldStep::Tidy,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clone => "clone template",
            Self::Sanitize => "sanitize",
            Self::MarkExecutable => "mark scripts executable",
            Self::Rewrite => "rewrite tokens",
            Self::Tidy => "tidy dependencies",
        }
    }
}

impl fmt::Display for ScaffoldStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress notifications emitted by [`ScaffoldService::scaffold_with_progress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Started(ScaffoldStep),
    Finished(ScaffoldStep),
    Skipped(ScaffoldStep),
}

/// Paths the orchestrator manipulates, relative to the root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    /// Version-control metadata directories to delete.
    pub vcs_dirs: Vec<PathBuf>,
    /// Dependency lock files to delete.
    pub lock_files: Vec<PathBuf>,
    /// Scripts to set to mode 0755.
    pub executable_scripts: Vec<PathBuf>,
    /// Whether to run the dependency tidier at the end.
    pub tidy: bool,
}

impl Default for ScaffoldPlan {
    fn default() -> Self {
        Self {
            vcs_dirs: vec![PathBuf::from(".git")],
            lock_files: vec![PathBuf::from("go.sum")],
            executable_scripts: vec![
                PathBuf::from("_build/build.sh"),
                PathBuf::from("_build/common.sh"),
            ],
            tidy: true,
        }
    }
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub run_id: Uuid,
    pub root_dir: PathBuf,
    pub completed: Vec<ScaffoldStep>,
    pub removed: Vec<PathBuf>,
    pub executables: Vec<PathBuf>,
    pub summary: RewriteSummary,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Arc<dyn Filesystem>,
    cloner: Box<dyn TemplateCloner>,
    tidier: Box<dyn DependencyTidier>,
    rewriter: TreeRewriter,
    plan: ScaffoldPlan,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters and the default plan.
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        cloner: Box<dyn TemplateCloner>,
        tidier: Box<dyn DependencyTidier>,
    ) -> Self {
        Self {
            rewriter: TreeRewriter::new(Arc::clone(&filesystem)),
            filesystem,
            cloner,
            tidier,
            plan: ScaffoldPlan::default(),
        }
    }

    pub fn with_plan(mut self, plan: ScaffoldPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Run every step for `descriptor`.
    pub fn scaffold(&self, descriptor: &TemplateDescriptor) -> ScaffolderResult<ScaffoldReport> {
        self.scaffold_with_progress(descriptor, &mut |_| {})
    }

    /// Run every step, reporting progress to `observer`.
    #[instrument(
        skip_all,
        fields(
            run_id = tracing::field::Empty,
            bin = %descriptor.bin_name(),
            root = %descriptor.root_dir().display()
        )
    )]
    pub fn scaffold_with_progress(
        &self,
        descriptor: &TemplateDescriptor,
        observer: &mut dyn FnMut(StepEvent),
    ) -> ScaffolderResult<ScaffoldReport> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        info!(source = %descriptor.source_location(), "Scaffolding project");

        let root = descriptor.root_dir();
        let mut report = ScaffoldReport {
            run_id,
            root_dir: root.to_path_buf(),
            completed: Vec::with_capacity(ScaffoldStep::ALL.len()),
            removed: Vec::new(),
            executables: Vec::new(),
            summary: RewriteSummary::default(),
        };

        run_step(ScaffoldStep::Clone, observer, || self.materialize(descriptor))?;
        report.completed.push(ScaffoldStep::Clone);

        report.removed = run_step(ScaffoldStep::Sanitize, observer, || self.sanitize(root))?;
        report.completed.push(ScaffoldStep::Sanitize);

        report.executables = run_step(ScaffoldStep::MarkExecutable, observer, || {
            self.mark_executable(root)
        })?;
        report.completed.push(ScaffoldStep::MarkExecutable);

        report.summary = run_step(ScaffoldStep::Rewrite, observer, || self.rewrite(descriptor))?;
        report.completed.push(ScaffoldStep::Rewrite);

        if self.plan.tidy {
            run_step(ScaffoldStep::Tidy, observer, || self.finalize(root))?;
            report.completed.push(ScaffoldStep::Tidy);
        } else {
            debug!("Dependency tidy disabled");
            observer(StepEvent::Skipped(ScaffoldStep::Tidy));
        }

        info!("Scaffold completed successfully");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Individual steps
    // -------------------------------------------------------------------------

    /// Step 1: clone the template into the root directory.
    pub fn materialize(&self, descriptor: &TemplateDescriptor) -> ScaffolderResult<()> {
        self.cloner
            .clone_template(descriptor.source_location(), descriptor.root_dir())
    }

    /// Step 2: remove VCS metadata and lock files. Absent entries are fine.
    ///
    /// Entries are removed by their actual kind, so a `.git` file (as left by
    /// worktrees and submodules) goes as readily as a `.git` directory.
    pub fn sanitize(&self, root: &Path) -> ScaffolderResult<Vec<PathBuf>> {
        let mut removed = Vec::new();

        for dir in &self.plan.vcs_dirs {
            let path = root.join(dir);
            if self.remove_entry(&path)? {
                debug!(path = %path.display(), "Removed VCS metadata");
                removed.push(path);
            }
        }

        for file in &self.plan.lock_files {
            let path = root.join(file);
            if self.remove_entry(&path)? {
                debug!(path = %path.display(), "Removed lock file");
                removed.push(path);
            }
        }

        Ok(removed)
    }

    /// Step 3: make the designated scripts executable. A missing script fails.
    pub fn mark_executable(&self, root: &Path) -> ScaffolderResult<Vec<PathBuf>> {
        let mut marked = Vec::with_capacity(self.plan.executable_scripts.len());
        for script in &self.plan.executable_scripts {
            let path = root.join(script);
            self.filesystem.set_mode(&path, FileMode::EXECUTABLE)?;
            debug!(path = %path.display(), "Marked executable");
            marked.push(path);
        }
        Ok(marked)
    }

    /// Step 4: rewrite tokens across the tree.
    pub fn rewrite(&self, descriptor: &TemplateDescriptor) -> ScaffolderResult<RewriteSummary> {
        self.rewriter.rewrite_tree(descriptor.root_dir(), descriptor)
    }

    /// Step 5: finalise dependency metadata inside the root directory.
    pub fn finalize(&self, root: &Path) -> ScaffolderResult<()> {
        self.tidier.tidy(root)
    }

    /// Remove whatever is at `path`. `Ok(false)` if nothing was there.
    fn remove_entry(&self, path: &Path) -> ScaffolderResult<bool> {
        match self.filesystem.entry_kind(path)? {
            None => Ok(false),
            Some(EntryKind::Directory) => self.filesystem.remove_dir_all(path).map(|()| true),
            Some(EntryKind::File | EntryKind::Other) => {
                self.filesystem.remove_file(path).map(|()| true)
            }
        }
    }
}

/// Run one step, tagging any failure with the step that produced it.
fn run_step<T>(
    step: ScaffoldStep,
    observer: &mut dyn FnMut(StepEvent),
    f: impl FnOnce() -> ScaffolderResult<T>,
) -> ScaffolderResult<T> {
    observer(StepEvent::Started(step));
    match f() {
        Ok(value) => {
            info!(%step, "Step completed");
            observer(StepEvent::Finished(step));
            Ok(value)
        }
        Err(e) => {
            error!(%step, error = %e, "Step failed");
            Err(ApplicationError::StepFailed {
                step,
                source: Box::new(e),
            }
            .into())
        }
    }
}
