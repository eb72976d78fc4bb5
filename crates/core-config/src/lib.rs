//! Configuration loading and parsing.
//!
//! Settings live in `scriv.toml`: a local file in the working directory
//! wins, then the platform config directory. A missing or malformed file
//! falls back to defaults rather than failing startup; unknown fields are
//! ignored so older binaries tolerate newer files.

use std::path::{Path, PathBuf};
use std::{fs, io};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Column budget paragraphs wrap to.
    #[serde(default = "Config::default_width")]
    pub width: usize,
    /// CUA-style bindings: style toggles on the familiar chords instead of
    /// the Emacs-style ones.
    #[serde(default)]
    pub cua: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            cua: false,
        }
    }
}

impl Config {
    const fn default_width() -> usize {
        79
    }
}

/// Best-effort config path following platform conventions: a local
/// `scriv.toml` first, then the XDG / AppData config directory.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("scriv.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("scriv").join("scriv.toml");
    }
    PathBuf::from("scriv.toml")
}

/// Load from the given path, or from [`discover`] when none is given. A
/// missing or unparsable file yields the defaults.
pub fn load_from(path: Option<PathBuf>) -> Config {
    let path = path.unwrap_or_else(discover);
    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<Config>(&content) {
            Ok(config) => {
                info!(path = %path.display(), "configuration loaded");
                config
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "bad configuration, using defaults");
                Config::default()
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => Config::default(),
        Err(err) => {
            warn!(path = %path.display(), %err, "unreadable configuration, using defaults");
            Config::default()
        }
    }
}

impl Config {
    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let body = toml::to_string_pretty(self).context("serializing configuration")?;
        fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_file_is_missing() {
        let dir = TempDir::new().unwrap();
        let config = load_from(Some(dir.path().join("absent.toml")));
        assert_eq!(config, Config::default());
        assert_eq!(config.width, 79);
        assert!(!config.cua);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scriv.toml");
        fs::write(&path, "cua = true\n").unwrap();
        let config = load_from(Some(path));
        assert_eq!(config.width, 79);
        assert!(config.cua);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scriv.toml");
        fs::write(&path, "width = \"not a number\"").unwrap();
        assert_eq!(load_from(Some(path)), Config::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scriv.toml");
        let config = Config {
            width: 60,
            cua: true,
        };
        config.save_to(&path).unwrap();
        assert_eq!(load_from(Some(path)), config);
    }
}
