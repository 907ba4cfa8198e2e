// src/config/mod.rs
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "sec_seek";
pub const CONFIG_FILE: &str = "config.toml";
pub const TICKERS_FILE: &str = "company_tickers.json";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Locations shared by every command. Built once in `main` and passed down.
#[derive(Debug, Clone)]
pub struct AppContext {
    config_dir: PathBuf,
}

impl AppContext {
    pub fn new<P: AsRef<Path>>(config_dir: P) -> Self {
        Self { config_dir: config_dir.as_ref().to_path_buf() }
    }

    /// Platform config directory (e.g. `~/.config/sec_seek` on Linux).
    pub fn from_platform() -> Self {
        let dir = dirs::config_dir()
            .map(|d| d.join(APP_NAME))
            .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_NAME)));
        Self::new(dir)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn tickers_file(&self) -> PathBuf {
        self.config_dir.join(TICKERS_FILE)
    }
}

/// How often the ticker table should be refreshed. Informational only, nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateFrequency {
    #[default]
    Never,
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for UpdateFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UpdateFrequency::Never => "never",
            UpdateFrequency::Daily => "daily",
            UpdateFrequency::Weekly => "weekly",
            UpdateFrequency::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub user_agent: String,
    #[serde(default)]
    pub ticker_update_frequency: UpdateFrequency,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn new(user_agent: &str) -> Result<Self, ConfigError> {
        let user_agent = user_agent.trim();
        if user_agent.is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        Ok(Self {
            user_agent: user_agent.to_string(),
            ticker_update_frequency: UpdateFrequency::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "user_agent = {}", self.user_agent)?;
        writeln!(f, "ticker_update_frequency = {}", self.ticker_update_frequency)?;
        write!(f, "request_timeout_secs = {}", self.request_timeout_secs)
    }
}

/// Creates the configuration directory (if needed) and writes a fresh `config.toml`.
/// An existing file is replaced.
pub fn init_config(ctx: &AppContext, user_agent: &str) -> Result<Settings, ConfigError> {
    let settings = Settings::new(user_agent)?;

    fs::create_dir_all(ctx.config_dir()).map_err(|source| ConfigError::Directory {
        path: ctx.config_dir().to_path_buf(),
        source,
    })?;

    let path = ctx.config_file();
    let body = toml::to_string(&settings)?;
    fs::write(&path, body).map_err(|source| ConfigError::Write { path: path.clone(), source })?;

    tracing::info!("Wrote configuration to {}", path.display());
    Ok(settings)
}

/// Reads `config.toml` from the context's directory.
pub fn load_settings(ctx: &AppContext) -> Result<Settings, ConfigError> {
    let path = ctx.config_file();
    if !path.exists() {
        return Err(ConfigError::Missing(path));
    }
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read { path: path.clone(), source })?;
    let settings: Settings = toml::from_str(&raw)?;
    if settings.user_agent.trim().is_empty() {
        return Err(ConfigError::EmptyUserAgent);
    }
    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}
