//! Configuration management for the changelog linter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project (`.changelog-lint.toml`) and user configuration files
//! - Precedence: command line, then configuration file, then defaults

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::OutputFormat;
use crate::validation::{Rule, RuleSet};

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".changelog-lint.toml";

/// Changelog checked when neither the command line nor a config file names one
pub const DEFAULT_CHANGELOG: &str = "CHANGELOG.md";

const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments shared by the linter and the language server
#[derive(Debug, Default, Parser)]
#[command(name = "changelog-lint")]
#[command(about = "Lint Keep-a-Changelog style CHANGELOG files")]
#[command(version)]
pub struct Args {
    /// Changelog files to check
    #[arg(help = "Changelog files to check (default: CHANGELOG.md)")]
    pub files: Vec<PathBuf>,

    /// Explicit configuration file
    #[arg(long, help = "Configuration file (default: ./.changelog-lint.toml)")]
    pub config: Option<PathBuf>,

    /// Output format for reported problems
    #[arg(long, value_enum, help = "Output format")]
    pub format: Option<OutputFormat>,

    /// Keep running and re-check files when they change
    #[arg(long, help = "Re-check files whenever they change")]
    pub watch: bool,

    /// Rules to switch off
    #[arg(long = "disable", value_enum, help = "Disable a rule (repeatable)")]
    pub disabled_rules: Vec<Rule>,

    /// Log level
    #[arg(long, help = "Log level (trace, debug, info, warn, error) [default: info]")]
    pub log_level: Option<String>,

    /// Editor clients start `changelog-ls --stdio`. Stdio is the only
    /// transport, so the flag is accepted and otherwise ignored.
    #[arg(long, hide = true)]
    pub stdio: bool,
}

/// Contents of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub files: Option<Vec<PathBuf>>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub rules: Option<RuleSet>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Changelog files to check
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub rules: RuleSet,
    pub watch: bool,
    pub log_level: String,
    /// Configuration file that was loaded, if any
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: vec![PathBuf::from(DEFAULT_CHANGELOG)],
            format: OutputFormat::default(),
            rules: RuleSet::default(),
            watch: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            config_file: None,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments and the current directory
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments, relative to the current directory
    pub fn from_args(args: Args) -> Result<Self> {
        Self::from_args_in(args, Path::new(""))
    }

    /// Create configuration from explicit arguments, resolving relative
    /// paths and the project config file against `dir`
    pub fn from_args_in(args: Args, dir: &Path) -> Result<Self> {
        let config_file = match &args.config {
            Some(path) => Some(dir.join(path)),
            None => discover_config_file(dir, dirs::config_dir().as_deref()),
        };

        let file_config = match &config_file {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };

        let files = if !args.files.is_empty() {
            args.files
        } else {
            file_config
                .files
                .unwrap_or_else(|| vec![PathBuf::from(DEFAULT_CHANGELOG)])
        };

        let mut rules = file_config.rules.unwrap_or_default();
        for rule in args.disabled_rules {
            rules.disable(rule);
        }

        Ok(Config {
            files: files.into_iter().map(|f| dir.join(f)).collect(),
            format: args.format.or(file_config.format).unwrap_or_default(),
            rules,
            watch: args.watch,
            log_level: args
                .log_level
                .or(file_config.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            config_file,
        })
    }

    pub fn has_config_file(&self) -> bool {
        self.config_file.is_some()
    }

    /// Initialise logging to stderr at the configured level; `RUST_LOG` wins
    pub fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(self.log_level.as_str());
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}

/// Find the configuration file to use: the project file in `dir` first, then
/// `<user config dir>/changelog-lint/config.toml`
pub fn discover_config_file(dir: &Path, user_config_dir: Option<&Path>) -> Option<PathBuf> {
    let project = dir.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    let user = user_config_dir?.join("changelog-lint").join("config.toml");
    user.is_file().then_some(user)
}
