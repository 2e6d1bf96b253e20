//! CLI configuration file.
//!
//! # Responsibility
//! - Read `~/.jotter.toml` (or an explicit path) into `AppConfig`.
//! - Place the database and logs under `~/.jotter` unless configured.
//! - Expand `~` prefixes against the user's home directory.
//!
//! # Invariants
//! - A missing default config file means defaults, never an error.
//! - A missing explicitly requested file is an error.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".jotter.toml";
const DEFAULT_DATA_DIR: &str = ".jotter";
const DEFAULT_DB_FILE_NAME: &str = "jotter.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    NoHomeDir,
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHomeDir => write!(f, "could not determine the home directory"),
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoHomeDir => None,
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    database_path: Option<String>,
    log_level: Option<String>,
    log_dir: Option<String>,
}

/// Effective settings for one CLI run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Loads `explicit` if given, else `~/.jotter.toml` when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let home = home::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (home.join(CONFIG_FILE_NAME), false),
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => String::new(),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Self::from_toml_str(&text, &home).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Parses config text, resolving defaults and `~` against `home`.
    pub fn from_toml_str(text: &str, home: &Path) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(text)?;
        let data_dir = home.join(DEFAULT_DATA_DIR);
        let resolve = |value: Option<String>, default: PathBuf| {
            value.map_or(default, |value| expand_home(&value, home))
        };

        Ok(Self {
            database_path: resolve(file.database_path, data_dir.join(DEFAULT_DB_FILE_NAME)),
            log_level: file
                .log_level
                .unwrap_or_else(|| jotter_core::default_log_level().to_string()),
            log_dir: resolve(file.log_dir, data_dir.join(DEFAULT_LOG_DIR_NAME)),
        })
    }
}

fn expand_home(value: &str, home: &Path) -> PathBuf {
    match value.strip_prefix('~') {
        Some(rest) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(value),
    }
}
