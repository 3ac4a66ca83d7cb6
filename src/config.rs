//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/domtree/domtree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `DOMTREE_*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::cli::error::{CliError, CliResult};

/// How a document is written after an operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Line-oriented markup, re-readable as input
    #[default]
    Html,
    /// Indented diagnostic tree
    Tree,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Tree => "tree",
        }
    }
}

/// Unified configuration for domtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Reject mismatched closing markers and unclosed tags
    pub strict: bool,
    /// Output format for rendered documents
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strict: true,
            format: OutputFormat::Html,
        }
    }
}

/// Get the XDG config directory for domtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "domtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("domtree.toml"))
}

impl Settings {
    /// Load settings with layered precedence, reading `DOMTREE_*` from the
    /// process environment.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        Self::load_with_env(explicit, None)
    }

    /// Load settings with an explicit environment map standing in for the
    /// process environment (None reads the real one).
    #[instrument(level = "debug")]
    pub fn load_with_env(
        explicit: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> CliResult<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("strict", defaults.strict)
            .map_err(config_err)?
            .set_default("format", defaults.format.as_str())
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("DOMTREE")
                .try_parsing(true)
                .source(env),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# domtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/domtree/domtree.toml
#   File:   --config <FILE>
#   Env:    DOMTREE_* environment variables (e.g. DOMTREE_STRICT=false)

# Reject closing markers that do not match the open tag, and tags left
# open at the end of input. Set to false to accept such documents.
# strict = true

# Output format for rendered documents: "html" or "tree"
# format = "html"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> CliError {
    CliError::Config {
        message: e.to_string(),
    }
}
