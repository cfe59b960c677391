//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "scaffolder",
    bin_name = "scaffolder",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffolder is a CLI tool for Go project scaffolding",
    long_about = "Scaffolder quickly creates new Go projects from template \
                  repositories. It clones a template, removes its git history, \
                  and replaces template tokens with the values you provide.",
    after_help = "EXAMPLES:\n\
        \x20 scaffolder init -m github.com/acme/billing -b billing\n\
        \x20 scaffolder init -m github.com/acme/api -b api -d \"Public API\" --vendor-name Acme\n\
        \x20 scaffolder version\n\
        \x20 scaffolder completions bash > /usr/share/bash-completion/completions/scaffolder",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template repository.
    #[command(
        about = "Initializes a new project using a Go template project",
        after_help = "EXAMPLES:\n\
            \x20 scaffolder init -m github.com/acme/billing -b billing\n\
            \x20 scaffolder init -m github.com/acme/api -b api -t https://github.com/acme/tmpl.git\n\
            \x20 scaffolder init -m github.com/acme/api -b api --dir services/api --skip-tidy"
    )]
    Init(InitArgs),

    /// Print version information.
    #[command(about = "Returns the current scaffolder version")]
    Version,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 scaffolder completions bash > ~/.local/share/bash-completion/completions/scaffolder\n\
            \x20 scaffolder completions zsh  > ~/.zfunc/_scaffolder\n\
            \x20 scaffolder completions fish > ~/.config/fish/completions/scaffolder.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Scaffolder configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 scaffolder config init\n\
            \x20 scaffolder config get defaults.template\n\
            \x20 scaffolder config list"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `scaffolder init`.
///
/// Module and binary names are optional at the parser level so that a
/// missing value is reported by descriptor validation with suggestions.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Go module path as set in go.mod.
    #[arg(
        short = 'm',
        long = "module-name",
        value_name = "MODULE",
        help = "Name of the go module (e.g. github.com/username/project-name) as set in go.mod"
    )]
    pub module_name: Option<String>,

    /// Name of the compiled binary; also the default project directory.
    #[arg(
        short = 'b',
        long = "bin-name",
        value_name = "BIN",
        help = "The name of the binary file to be compiled"
    )]
    pub bin_name: Option<String>,

    /// Template repository to clone.
    #[arg(
        short = 't',
        long = "template",
        value_name = "URL",
        help = "The template project to clone [default: from config]"
    )]
    pub template: Option<String>,

    /// Project description, set in the Dockerfile as a label.
    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "A brief description of the project"
    )]
    pub description: Option<String>,

    /// Vendor name, set in the Dockerfile as a label.
    ///
    /// Long form only: `-v` is the global verbosity flag.
    #[arg(
        long = "vendor-name",
        visible_alias = "vendor",
        value_name = "VENDOR",
        help = "The name of the vendor"
    )]
    pub vendor_name: Option<String>,

    /// Directory to create the project in.
    #[arg(
        long = "dir",
        value_name = "PATH",
        help = "Project directory [default: the binary name]"
    )]
    pub dir: Option<PathBuf>,

    /// Do not run `go mod tidy` after rewriting.
    #[arg(long = "skip-tidy", help = "Skip dependency tidying")]
    pub skip_tidy: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Print the resolved settings and stop.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `scaffolder completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `scaffolder config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.template`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_init_command() {
        let cli = Cli::parse_from([
            "scaffolder",
            "init",
            "-m",
            "github.com/acme/svc",
            "-b",
            "svc",
            "-d",
            "a service",
            "--vendor-name",
            "Acme",
        ]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.module_name.as_deref(), Some("github.com/acme/svc"));
        assert_eq!(args.bin_name.as_deref(), Some("svc"));
        assert_eq!(args.description.as_deref(), Some("a service"));
        assert_eq!(args.vendor_name.as_deref(), Some("Acme"));
        assert!(args.template.is_none());
        assert!(!args.skip_tidy);
    }

    #[test]
    fn verbose_flag_after_init_is_global() {
        let cli = Cli::parse_from(["scaffolder", "init", "-b", "svc", "-vv"]);
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn vendor_alias() {
        let cli = Cli::parse_from(["scaffolder", "init", "--vendor", "Acme"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.vendor_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn config_subcommands_parse() {
        let cli = Cli::parse_from(["scaffolder", "config", "get", "tools.git"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Get { ref key }) if key == "tools.git"
        ));
        let cli = Cli::parse_from(["scaffolder", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["scaffolder", "--quiet", "--verbose", "version"]);
        assert!(result.is_err());
    }
}
