pub mod settings;

pub use settings::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const FOLDER_ID_VAR: &str = "FOLDER_ID";
pub const LLM_KEY_VAR: &str = "YANDEXGPT_KEY";
pub const SEARCH_KEY_VAR: &str = "YANDEX_SEARCH_KEY";

/// Configuration errors that must stop the process at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingCredential(&'static str),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Get the default configuration file path (`<config_dir>/qa/config.toml`)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("qa");
    Ok(config_dir.join("config.toml"))
}

/// Load configuration for the running process.
///
/// Reads `.env` (if any), then the TOML file at `explicit_path` or the default
/// location (a missing default file just means built-in defaults), then applies
/// the process environment.
pub fn load(explicit_path: Option<&Path>) -> Result<Config> {
    env_file_loaded(dotenvy::dotenv())?;

    let path = match explicit_path {
        Some(p) => Some(p.to_path_buf()),
        None => config_path().ok().filter(|p| p.exists()),
    };

    let content = match &path {
        Some(p) => Some(
            fs::read_to_string(p)
                .with_context(|| format!("Failed to read config file: {}", p.display()))?,
        ),
        None => None,
    };

    let config = Config::from_sources(content.as_deref(), |key| std::env::var(key).ok())?;

    tracing::debug!(
        config_file = ?path,
        bind = %config.bind,
        "configuration loaded"
    );

    Ok(config)
}

impl Config {
    /// Build a configuration from optional TOML text and an environment lookup.
    pub fn from_sources<F>(toml_text: Option<&str>, env: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Config = match toml_text {
            Some(text) => toml::from_str(text)?,
            None => Config::default(),
        };

        config.folder_id = required(&env, FOLDER_ID_VAR)?;
        config.llm_api_key = required(&env, LLM_KEY_VAR)?;
        config.search_api_key = required(&env, SEARCH_KEY_VAR)?;

        if let Some(bind) = non_blank(&env, "QA_BIND") {
            config.bind = bind;
        }
        if let Some(url) = non_blank(&env, "QA_LLM_URL") {
            config.llm.url = url;
        }
        if let Some(url) = non_blank(&env, "QA_SEARCH_URL") {
            config.search.url = url;
        }

        Ok(config)
    }
}

/// A missing `.env` is fine; one that exists but cannot be read or parsed is not.
fn env_file_loaded<T>(result: Result<T, dotenvy::Error>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).context("Failed to load .env file"),
    }
}

fn non_blank<F>(env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(env: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(env, key).ok_or(ConfigError::MissingCredential(key))
}
