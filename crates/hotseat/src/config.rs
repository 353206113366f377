//! Settings for the terminal front end, read from an optional TOML file.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "hotseat.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotseatConfig {
    /// Chess glyphs instead of letters.
    pub unicode_pieces: bool,
    /// Mark the legal destinations of the selected piece.
    pub show_destinations: bool,
    /// Draw the board from the side to move.
    pub flip_board: bool,
    /// Print a JSON snapshot after every ply.
    pub emit_json: bool,
    /// Filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for HotseatConfig {
    fn default() -> Self {
        Self {
            unicode_pieces: true,
            show_destinations: true,
            flip_board: false,
            emit_json: false,
            log_filter: "warn".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl HotseatConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load settings from `path`. A file that does not exist yields the
    /// defaults; one that cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
