use std::path::Path;
use std::process::Command;

use scaffolder_core::{application::ports::TemplateCloner, error::ScaffolderResult};
use tracing::info;

use super::run_command;

/// Clones template repositories with the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCloner {
    program: String,
}

impl GitCloner {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a different executable, e.g. an absolute path from configuration.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for GitCloner {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCloner for GitCloner {
    fn clone_template(&self, source: &str, destination: &Path) -> ScaffolderResult<()> {
        info!(source, destination = %destination.display(), "Cloning template");
        run_command(
            Command::new(&self.program)
                .arg("clone")
                .arg(source)
                .arg(destination),
        )
    }
}
