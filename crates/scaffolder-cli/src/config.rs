//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only receives the values it needs
//! (a `ScaffoldPlan`, tool names).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `SCAFFOLDER_*` environment variables, `__` separating sections
//!    (e.g. `SCAFFOLDER_TOOLS__GIT=/usr/local/bin/git`)
//! 3. Config file (`--config FILE`, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use scaffolder_core::application::ScaffoldPlan;

/// Template cloned when neither `--template` nor the config names one.
pub const DEFAULT_TEMPLATE: &str = "https://github.com/twistingmercury/go-basic-tmpl.git";

const ENV_PREFIX: &str = "SCAFFOLDER";

/// Keys whose environment values are comma-separated lists.
const LIST_KEYS: [&str; 3] = [
    "scaffold.vcs_dirs",
    "scaffold.lock_files",
    "scaffold.executable_scripts",
];

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// External programs.
    pub tools: ToolsConfig,
    /// What the scaffold steps touch.
    pub scaffold: ScaffoldConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub template: String,
    pub vendor_name: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.into(),
            vendor_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub git: String,
    pub go: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: "git".into(),
            go: "go".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub vcs_dirs: Vec<PathBuf>,
    pub lock_files: Vec<PathBuf>,
    pub executable_scripts: Vec<PathBuf>,
    pub tidy: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        let plan = ScaffoldPlan::default();
        Self {
            vcs_dirs: plan.vcs_dirs,
            lock_files: plan.lock_files,
            executable_scripts: plan.executable_scripts,
            tidy: plan.tidy,
        }
    }
}

impl ScaffoldConfig {
    pub fn to_plan(&self) -> ScaffoldPlan {
        ScaffoldPlan {
            vcs_dirs: self.vcs_dirs.clone(),
            lock_files: self.lock_files.clone(),
            executable_scripts: self.executable_scripts.clone(),
            tidy: self.tidy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the file and the process environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with(config_file, env_source())
    }

    fn load_with(config_file: Option<&PathBuf>, env: Environment) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let config = Config::builder()
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.scaffolder.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "scaffolder", "scaffolder")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".scaffolder.toml"))
    }

    /// Look up a dotted key such as `tools.git`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            value = value.get_mut(part)?.take();
        }
        Some(value)
    }
}

fn env_source() -> Environment {
    LIST_KEYS.into_iter().fold(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
        Environment::with_list_parse_key,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        LIST_KEYS.into_iter().fold(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .source(Some(map)),
            Environment::with_list_parse_key,
        )
    }

    #[test]
    fn defaults_match_original_tool() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.template, DEFAULT_TEMPLATE);
        assert_eq!(cfg.tools.git, "git");
        assert_eq!(cfg.scaffold.to_plan(), ScaffoldPlan::default());
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(AppConfig::load_with(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[defaults]\nvendor_name = \"Acme\"\n\n[scaffold]\ntidy = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load_with(Some(&path), env(&[])).unwrap();
        assert_eq!(cfg.defaults.vendor_name.as_deref(), Some("Acme"));
        assert!(!cfg.scaffold.tidy);
        assert_eq!(cfg.defaults.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn environment_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[tools]\ngit = \"/opt/git\"\n").unwrap();

        let cfg = AppConfig::load_with(
            Some(&path),
            env(&[
                ("SCAFFOLDER_TOOLS__GIT", "/usr/bin/git"),
                ("SCAFFOLDER_SCAFFOLD__LOCK_FILES", "go.sum,go.work.sum"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.tools.git, "/usr/bin/git");
        assert_eq!(
            cfg.scaffold.lock_files,
            [PathBuf::from("go.sum"), PathBuf::from("go.work.sum")]
        );
    }

    #[test]
    fn get_dotted_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.get("tools.go"),
            Some(serde_json::Value::String("go".into()))
        );
        assert_eq!(cfg.get("scaffold.tidy"), Some(serde_json::Value::Bool(true)));
        assert!(cfg.get("tools.missing").is_none());
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = AppConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
