use anyhow::{Context, Result};
use engine::LinkerConfig;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

#[cfg(windows)]
pub fn config_dir() -> PathBuf {
    std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("featgraph")
}

#[cfg(not(windows))]
pub fn config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config")
        .join("featgraph")
}

fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub linker: LinkerConfig,
}

/// Loads `explicit` if given, otherwise the user config file when it exists,
/// otherwise the defaults. A missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_file_path();
            if !path.exists() {
                return Ok(Config::default());
            }
            path
        }
    };
    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
