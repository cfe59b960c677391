//! Implementation of the `scaffolder init` command.
//!
//! Responsibility: resolve flags against the configuration, build a
//! `TemplateDescriptor`, wire the adapters into a `ScaffoldService`, and
//! display results. No business logic lives here.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use scaffolder_adapters::{GitCloner, GoModTidy, LocalFilesystem};
use scaffolder_core::{
    application::{ScaffoldReport, ScaffoldService},
    domain::{TemplateDescriptor, TokenRegistry},
    error::ScaffolderError,
};

use crate::{
    cli::{GlobalArgs, InitArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Flag values after applying the case policy and config fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedInit {
    pub module_name: String,
    pub bin_name: String,
    pub vendor_name: String,
    pub description: String,
    pub template: String,
    pub root_dir: PathBuf,
    pub tidy: bool,
}

/// Execute the `scaffolder init` command.
///
/// Dispatch sequence:
/// 1. Resolve flags (lower-casing, config defaults)
/// 2. Build and validate the descriptor
/// 3. Show configuration; stop here on `--dry-run`
/// 4. Refuse an existing project directory
/// 5. Confirm with user unless `--yes`, `--quiet` or non-interactive
/// 6. Run the scaffold steps with progress output
#[instrument(skip_all)]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1-2. Resolve and validate
    let resolved = resolve(&args, &config);
    let descriptor = build_descriptor(&resolved)?;
    debug!(descriptor = %descriptor, "Descriptor built");

    // 3. Show configuration
    show_configuration(&resolved, &output)?;
    if args.dry_run {
        if output.format() == OutputFormat::Json {
            output.json(&resolved)?;
        }
        output.info("Dry run: nothing was created")?;
        return Ok(());
    }

    // 4. Existing directory
    if resolved.root_dir.exists() {
        return Err(CliError::ProjectExists {
            path: resolved.root_dir,
        });
    }

    // 5. Confirm
    let interactive = output.format() == OutputFormat::Human && std::io::stdin().is_terminal();
    if !global.quiet && !args.yes && interactive && !confirm(&resolved.root_dir)? {
        return Err(CliError::Cancelled);
    }

    // 6. Scaffold
    let mut plan = config.scaffold.to_plan();
    plan.tidy &= resolved.tidy;
    let service = ScaffoldService::new(
        Arc::new(LocalFilesystem::new()),
        Box::new(GitCloner::with_program(&config.tools.git)),
        Box::new(GoModTidy::with_program(&config.tools.go)),
    )
    .with_plan(plan);

    output.header(&format!("Creating '{}'...", descriptor.bin_name()))?;
    let mut progress = output.step_progress();
    let result = service.scaffold_with_progress(&descriptor, &mut |event| progress.on_event(event));
    progress.finish()?;
    let report = result?;

    info!(run_id = %report.run_id, root = %report.root_dir.display(), "Project created");
    show_report(&report, &output)
}

/// Apply the case policy and config fallbacks to the raw flags.
///
/// Module and binary names are lower-cased. The project directory defaults
/// to the binary name.
pub fn resolve(args: &InitArgs, config: &AppConfig) -> ResolvedInit {
    let module_name = args
        .module_name
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let bin_name = args
        .bin_name
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let root_dir = args.dir.clone().unwrap_or_else(|| PathBuf::from(&bin_name));

    ResolvedInit {
        module_name,
        bin_name,
        vendor_name: args
            .vendor_name
            .clone()
            .or_else(|| config.defaults.vendor_name.clone())
            .unwrap_or_default(),
        description: args.description.clone().unwrap_or_default(),
        template: args
            .template
            .clone()
            .unwrap_or_else(|| config.defaults.template.clone()),
        root_dir,
        tidy: !args.skip_tidy,
    }
}

fn build_descriptor(resolved: &ResolvedInit) -> CliResult<TemplateDescriptor> {
    TemplateDescriptor::builder(Arc::new(TokenRegistry::standard()))
        .source_location(&resolved.template)
        .root_dir(&resolved.root_dir)
        .module_name(&resolved.module_name)
        .bin_name(&resolved.bin_name)
        .vendor_name(&resolved.vendor_name)
        .description(&resolved.description)
        .build()
        .map_err(|e| CliError::Core(ScaffolderError::from(e)))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(resolved: &ResolvedInit, out: &OutputManager) -> CliResult<()> {
    let or_default = |value: &str| {
        if value.is_empty() {
            "(default)".to_string()
        } else {
            value.to_string()
        }
    };

    out.header("Configuration")?;
    out.print(&format!("  Module name:  {}", resolved.module_name))?;
    out.print(&format!("  Bin name:     {}", resolved.bin_name))?;
    out.print(&format!("  Vendor name:  {}", or_default(&resolved.vendor_name)))?;
    out.print(&format!("  Description:  {}", or_default(&resolved.description)))?;
    out.print(&format!("  Template:     {}", resolved.template))?;
    out.print(&format!("  Directory:    {}", resolved.root_dir.display()))?;
    out.print("")?;
    Ok(())
}

fn show_report(report: &ScaffoldReport, out: &OutputManager) -> CliResult<()> {
    if out.format() == OutputFormat::Json {
        out.json(report)?;
        return Ok(());
    }

    let summary = &report.summary;
    out.success(&format!(
        "Project created in {} ({} files, {} rewritten)",
        report.root_dir.display(),
        summary.files,
        summary.changed,
    ))?;
    if summary.empty > 0 || summary.skipped > 0 {
        out.info(&format!(
            "{} empty files left as-is, {} non-regular entries skipped",
            summary.empty, summary.skipped
        ))?;
    }

    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {}", report.root_dir.display()))?;
    out.print("  ./_build/build.sh")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(root: &Path) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(format!("Create project in {}?", root.display()))
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(root: &Path) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Create project in {}? [Y/n] ", root.display());
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
