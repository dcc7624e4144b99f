use anyhow::bail;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::infra::pool::DEFAULT_WORKERS;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    client_id: Option<String>,
    mal_username: Option<String>,
    request_timeout_secs: Option<u64>,
    detail_workers: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub username: String,
}

#[derive(Debug, Default)]
pub struct Config {
    file: ConfigFile,
}

impl Config {
    /// Loads `.env` from the working directory and the config file, if present.
    ///
    /// An unreadable config file is only fatal when `uses_mal` is set; otherwise
    /// it is reported and defaults are used.
    pub fn load(uses_mal: bool) -> Result<Self> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();
        Self::from_path_or_default(&get_config_path(), uses_mal)
    }

    fn from_path_or_default(path: &Path, uses_mal: bool) -> Result<Self> {
        match Self::from_path(path) {
            Ok(config) => Ok(config),
            Err(e) if !uses_mal => {
                tracing::warn!("Ignoring config file: {e:#}");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    fn from_path(path: &Path) -> Result<Self> {
        let file = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str::<ConfigFile>(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        } else {
            ConfigFile::default()
        };
        Ok(Self { file })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn detail_workers(&self) -> usize {
        self.file.detail_workers.unwrap_or(DEFAULT_WORKERS).max(1)
    }

    /// MAL credentials, environment first, then the config file.
    pub fn credentials(&self) -> Result<Credentials> {
        let client_id = lookup("CLIENT_ID", self.file.client_id.as_ref())?;
        let username = lookup("MAL_USERNAME", self.file.mal_username.as_ref())?;
        Ok(Credentials {
            client_id,
            username,
        })
    }
}

fn lookup(var: &str, from_file: Option<&String>) -> Result<String> {
    if let Ok(value) = env::var(var) {
        if !value.is_empty() {
            return Ok(value);
        }
    }

    if let Some(value) = from_file.filter(|v| !v.is_empty()) {
        return Ok(value.clone());
    }

    bail!(
        "{var} is not configured. Set the {var} environment variable (or add it to .env) or add {} = \"...\" to {}",
        var.to_lowercase(),
        get_config_path().display()
    )
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("mal-rss-link"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}
