//! Runtime configuration for the admin console.
//!
//! [`Config`] is the single source of truth for settings, independent of how
//! they were specified. Values are resolved in three layers, later layers
//! winning:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`--config FILE`)
//! 3. Command-line flags and their environment variables
//!
//! # Example file
//!
//! ```toml
//! seed = 7
//! page_size = 10
//! theme = "ascii"
//! admin = "Dilani"
//! max_column_width = 24
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use datagrid::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::Cli;

/// Seed used when none is configured, so output is reproducible by default.
pub const DEFAULT_SEED: u64 = 42;

/// Widest a rendered column may grow before truncation.
pub const DEFAULT_MAX_COLUMN_WIDTH: usize = 28;

/// Runtime configuration for the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Seed for deterministic data generation.
    pub seed: u64,

    /// Rows per page when a command does not say otherwise.
    pub page_size: usize,

    /// Theme name: `unicode` or `ascii`.
    pub theme: String,

    /// Display name of the signed-in admin.
    pub admin: String,

    /// Truncation width for table cells.
    pub max_column_width: usize,

    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    #[serde(skip)]
    pub verbosity: u8,

    /// File the settings were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            page_size: DEFAULT_PAGE_SIZE,
            theme: "unicode".to_string(),
            admin: "admin".to_string(),
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            verbosity: 0,
            source: None,
        }
    }
}

/// Settings a config file may carry; anything left out keeps its default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    seed: Option<u64>,
    page_size: Option<usize>,
    theme: Option<String>,
    admin: Option<String>,
    max_column_width: Option<usize>,
}

impl Config {
    /// Resolve configuration from defaults, the config file named on the
    /// command line, then the flags themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or the result
    /// fails [`validate`](Self::validate).
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        debug!(source = ?config.source, seed = config.seed, "Configuration resolved");
        Ok(config)
    }

    /// Read a TOML file over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`], [`ConfigError::Read`] or
    /// [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let file: FileConfig = toml::from_str(&text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        })?;

        let defaults = Self::default();
        Ok(Self {
            seed: file.seed.unwrap_or(defaults.seed),
            page_size: file.page_size.unwrap_or(defaults.page_size),
            theme: file.theme.unwrap_or(defaults.theme),
            admin: file.admin.unwrap_or(defaults.admin),
            max_column_width: file.max_column_width.unwrap_or(defaults.max_column_width),
            verbosity: 0,
            source: Some(path.to_path_buf()),
        })
    }

    /// Overlay command-line flags.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(theme) = &cli.theme {
            self.theme.clone_from(theme);
        }
        if let Some(admin) = &cli.admin {
            self.admin.clone_from(admin);
        }
        self.verbosity = cli.verbose;
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize {
                size: self.page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        if !matches!(self.theme.to_ascii_lowercase().as_str(), "unicode" | "ascii") {
            return Err(ConfigError::InvalidTheme(self.theme.clone()));
        }
        if self.max_column_width < 4 {
            return Err(ConfigError::InvalidColumnWidth(self.max_column_width));
        }
        Ok(())
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        let mut lines = Vec::new();

        match &self.source {
            Some(path) => lines.push(format!("Config file: {}", path.display())),
            None => lines.push("Config file: (none)".to_string()),
        }
        lines.push(format!("Seed: {}", self.seed));
        lines.push(format!("Page size: {}", self.page_size));
        lines.push(format!("Theme: {}", self.theme));
        lines.push(format!("Admin: {}", self.admin));
        lines.push(format!("Max column width: {}", self.max_column_width));
        lines.push(format!("Verbosity: {}", self.verbosity));

        lines.join("\n")
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Config file could not be read.
    #[error("Could not read config file {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    /// Config file is not valid TOML for this schema.
    #[error("Invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Page size outside the accepted range.
    #[error("Invalid page size {size}: must be between 1 and {max}")]
    InvalidPageSize { size: usize, max: usize },

    /// Unknown theme name.
    #[error("Invalid theme name: {0} (expected unicode or ascii)")]
    InvalidTheme(String),

    /// Column width too narrow to show anything.
    #[error("Invalid max column width: {0} (minimum 4)")]
    InvalidColumnWidth(usize),
}
