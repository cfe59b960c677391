//! `scaffolder config`: inspect and create the configuration file.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::{
    cli::{ConfigCommands, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = active_path(&global);
    match cmd {
        ConfigCommands::Init { force } => init(&path, force, &output),

        ConfigCommands::Get { key } => {
            let value = config.get(&key).ok_or_else(|| CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            })?;
            if output.format() == OutputFormat::Json {
                output.json(&value)?;
            } else {
                output.print(&render_value(&value))?;
            }
            Ok(())
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                output.print(&to_toml(&config)?)?;
            }
            Ok(())
        }

        ConfigCommands::Path => {
            output.print(&path.display().to_string())?;
            Ok(())
        }
    }
}

/// The file `--config` points at, else the platform default.
fn active_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(AppConfig::config_path)
}

fn init(path: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    if path.exists() && !force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    let contents = format!(
        "# Scaffolder configuration, generated {}\n\n{}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        to_toml(&AppConfig::default())?
    );

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, contents)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Strings print bare; everything else as JSON.
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn render_strings_bare() {
        assert_eq!(render_value(&serde_json::json!("git")), "git");
        assert_eq!(render_value(&serde_json::json!(true)), "true");
        assert_eq!(render_value(&serde_json::json!([".git"])), "[\".git\"]");
    }

    #[test]
    fn init_writes_loadable_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        init(&path, false, &quiet_output()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Scaffolder configuration"));
        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.tools, AppConfig::default().tools);
    }

    #[test]
    fn init_keeps_existing_file_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[tools]\ngit = \"mine\"\n").unwrap();

        init(&path, false, &quiet_output()).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("mine"));

        init(&path, true, &quiet_output()).unwrap();
        assert!(!std::fs::read_to_string(&path).unwrap().contains("mine"));
    }
}
