//! Run configuration
//!
//! Values are layered from lowest to highest priority: built-in defaults, a
//! TOML file, `USER_ACTIVITY_*` environment variables, then command-line
//! flags (applied by the binary).

use crate::aggregate::MissingCountPolicy;
use crate::error::{Error, Result};
use crate::source::CachePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[cfg(test)]
mod tests;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "user-activity.toml";

const ENV_PREFIX: &str = "USER_ACTIVITY_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub users_url: String,
    pub posts_url: String,
    /// Where the raw `users.json` / `posts.json` copies live
    pub data_dir: PathBuf,
    /// Where the activity JSON and CSV reports are written
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub top_n: usize,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Local copies older than this are fetched again; unset reuses any copy
    #[serde(with = "humantime_serde")]
    pub max_age: Option<Duration>,
    pub missing_count: MissingCountPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users_url: "https://jsonplaceholder.typicode.com/users".to_string(),
            posts_url: "https://jsonplaceholder.typicode.com/posts".to_string(),
            data_dir: PathBuf::from("datas"),
            output_dir: PathBuf::from("reports"),
            log_file: PathBuf::from("logs/app.log"),
            top_n: 5,
            timeout: Duration::from_secs(10),
            max_age: None,
            missing_count: MissingCountPolicy::ZeroFill,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from an explicit file, or from [`DEFAULT_CONFIG_FILE`] in the
    /// working directory if it exists, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.merge_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a full variable name to its
    /// value.
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(url) = var("USERS_URL") {
            self.users_url = url;
        }
        if let Some(url) = var("POSTS_URL") {
            self.posts_url = url;
        }
        if let Some(dir) = var("DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = var("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(file) = var("LOG_FILE") {
            self.log_file = PathBuf::from(file);
        }
        if let Some(top_n) = var("TOP_N") {
            self.top_n = top_n.trim().parse().map_err(|_| {
                Error::Config(format!("{ENV_PREFIX}TOP_N must be a non-negative integer, got '{top_n}'"))
            })?;
        }
        if let Some(timeout) = var("TIMEOUT") {
            self.timeout = parse_duration("TIMEOUT", &timeout)?;
        }
        if let Some(max_age) = var("MAX_AGE") {
            self.max_age = Some(parse_duration("MAX_AGE", &max_age)?);
        }
        if let Some(policy) = var("MISSING_COUNT") {
            self.missing_count = policy.parse()?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.users_url.trim().is_empty() {
            return Err(Error::Config("users_url must not be empty".to_string()));
        }
        if self.posts_url.trim().is_empty() {
            return Err(Error::Config("posts_url must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Freshness predicate for the local copies.
    pub fn cache_policy(&self) -> CachePolicy {
        match self.max_age {
            Some(max_age) => CachePolicy::MaxAge(max_age),
            None => CachePolicy::Reuse,
        }
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    pub fn posts_path(&self) -> PathBuf {
        self.data_dir.join("posts.json")
    }
}

fn parse_duration(name: &str, value: &str) -> Result<Duration> {
    humantime_serde::re::humantime::parse_duration(value.trim()).map_err(|e| {
        Error::Config(format!("{ENV_PREFIX}{name} is not a valid duration ('{value}'): {e}"))
    })
}
