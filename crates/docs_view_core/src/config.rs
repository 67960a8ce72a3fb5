//! Configuration file.
//!
//! ```toml
//! [document]
//! candidates = ["docs/README.md", "README.md"]
//! title = "Project Docs"
//!
//! [render]
//! enable-toc = false
//!
//! [log]
//! max-level = "debug"
//! log-target = "docs_view_core=trace"
//! ```

use crate::error::{Error, Result};
use crate::loader::DEFAULT_CANDIDATES;
use crate::render::RenderOptions;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Locations tried in order, relative paths resolve against the working directory.
    pub candidates: Vec<PathBuf>,

    /// Page title of the composed document.
    pub title: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.iter().map(PathBuf::from).collect(),
            title: crate::navigation::NAV_TITLE.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LogConfig {
    /// Write logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,

    /// Specify the max log level.
    pub max_level: String,

    /// Extra filter directives, for example `docs_view_core::render=trace`.
    pub log_target: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            max_level: "info".into(),
            log_target: "".into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    pub document: DocumentConfig,
    pub render: RenderOptions,
    pub log: LogConfig,
}

/// Result of [`load_config`].
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub file_path: Option<PathBuf>,
    /// Set when the file exists but could not be used, defaults are in effect.
    pub maybe_error: Option<Error>,
}

/// Default config file location.
///
/// Linux: ~/.config/docs-view/config.toml
/// macOS: ~/Library/Application Support/org.docs-view.docs-view/config.toml
pub fn default_config_file() -> Result<PathBuf> {
    ProjectDirs::from("org", "docs-view", "docs-view")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(Error::NoProjectDir)
}

pub fn parse_config(contents: &str) -> Result<Config> {
    Ok(toml::from_str(contents)?)
}

fn read_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents)
}

/// Loads the config from `specified_config_file` or the default location.
///
/// Never fails: a missing default file silently gives the defaults, any
/// other problem gives the defaults plus the error.
pub fn load_config(specified_config_file: Option<PathBuf>) -> LoadedConfig {
    let explicit = specified_config_file.is_some();
    let config_file = match specified_config_file.map_or_else(default_config_file, Ok) {
        Ok(path) => path,
        Err(err) => {
            return LoadedConfig {
                config: Config::default(),
                file_path: None,
                maybe_error: Some(err),
            }
        }
    };

    if !explicit && !config_file.exists() {
        return LoadedConfig {
            config: Config::default(),
            file_path: None,
            maybe_error: None,
        };
    }

    let (config, maybe_error) = match read_config(&config_file) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    LoadedConfig {
        config,
        file_path: Some(config_file),
        maybe_error,
    }
}
