//! Adapters that shell out to external tools.

mod git;
mod go;

pub use git::GitCloner;
pub use go::GoModTidy;

use std::process::Command;

use scaffolder_core::{application::ApplicationError, error::ScaffolderResult};
use tracing::{debug, instrument};

/// Run `command` to completion, mapping spawn failures and non-zero exits to
/// `ApplicationError::ExternalCommand`.
#[instrument(skip_all, fields(command = %describe(command)))]
pub(crate) fn run_command(command: &mut Command) -> ScaffolderResult<()> {
    let description = describe(command);
    let output = command
        .output()
        .map_err(|e| ApplicationError::ExternalCommand {
            command: description.clone(),
            reason: e.to_string(),
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        debug!(stderr = %stderr.trim(), "Command stderr");
    }

    if output.status.success() {
        debug!("Command finished");
        return Ok(());
    }

    let reason = match stderr.trim() {
        "" => format!("exited with {}", output.status),
        detail => format!("exited with {}: {detail}", output.status),
    };
    Err(ApplicationError::ExternalCommand {
        command: description,
        reason,
    }
    .into())
}

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
