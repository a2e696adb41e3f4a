//! Configuration loading and parsing for husk.
//!
//! Configuration lives at `~/.husk/config.toml`. Every field is optional;
//! an absent file means defaults everywhere: `qjs` as the interpreter and
//! `_tmp.js` as the artifact path.
//!
//! ```toml
//! [interpreter]
//! binary = "qjs"
//! args = []
//!
//! [artifact]
//! path = "_tmp.js"
//! keep = true
//! ```

use serde::Deserialize;
use std::{fs, path::PathBuf};

// Default value function for serde (bool::default() is false, so only true needs a fn)
pub(crate) const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct HuskConfig {
    /// Interpreter override for script execution.
    pub interpreter: Option<InterpreterConfig>,
    /// Script artifact placement and retention.
    pub artifact: Option<ArtifactConfig>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Interpreter invocation overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterpreterConfig {
    /// Path or name of the interpreter binary. Bare names resolve on PATH.
    pub binary: Option<String>,
    /// Arguments placed before the script path.
    pub args: Option<Vec<String>>,
}

/// Script artifact placement and retention.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    /// Destination path, relative to the current working directory.
    pub path: Option<PathBuf>,
    /// When false, the artifact is removed on every exit path after the run.
    #[serde(default = "default_true")]
    pub keep: bool,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            path: None,
            keep: true,
        }
    }
}

impl HuskConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".husk").join("config.toml"))
}
