use std::path::Path;
use std::process::Command;

use scaffolder_core::{application::ports::DependencyTidier, error::ScaffolderResult};
use tracing::info;

use super::run_command;

/// Runs `go mod tidy` in the new project.
#[derive(Debug, Clone)]
pub struct GoModTidy {
    program: String,
}

impl GoModTidy {
    pub fn new() -> Self {
        Self::with_program("go")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for GoModTidy {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyTidier for GoModTidy {
    fn tidy(&self, working_dir: &Path) -> ScaffolderResult<()> {
        info!(dir = %working_dir.display(), "Tidying Go module");
        run_command(
            Command::new(&self.program)
                .args(["mod", "tidy"])
                .current_dir(working_dir),
        )
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use scaffolder_core::error::ErrorCategory;
    use tempfile::TempDir;

    #[test]
    fn runs_in_working_dir() {
        let temp = TempDir::new().unwrap();
        let tidier = GoModTidy::with_program("true");
        assert!(tidier.tidy(temp.path()).is_ok());
    }

    #[test]
    fn missing_working_dir_fails() {
        let temp = TempDir::new().unwrap();
        let tidier = GoModTidy::with_program("true");
        let err = tidier.tidy(&temp.path().join("gone")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::External);
    }

    #[test]
    fn defaults_to_go() {
        assert_eq!(GoModTidy::default().program(), "go");
    }
}
