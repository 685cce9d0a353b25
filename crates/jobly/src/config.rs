//! Database configuration.
//!
//! Loaded from the environment (with `.env` support) or from a TOML file:
//!
//! ```toml
//! [database]
//! url = "postgres://${PGUSER}@localhost/jobly"
//! pool_max_size = 8
//! ```

use crate::error::{JoblyError, JoblyResult};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_POOL_MAX_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoblyConfig {
    pub database_url: String,
    pub pool_max_size: usize,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    database: DatabaseSection,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    url: String,
    #[serde(default = "default_pool_max_size")]
    pool_max_size: usize,
}

fn default_pool_max_size() -> usize {
    DEFAULT_POOL_MAX_SIZE
}

impl JoblyConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
        }
    }

    pub fn with_pool_max_size(mut self, max_size: usize) -> Self {
        self.pool_max_size = max_size;
        self
    }

    /// Read `DATABASE_URL` and optional `JOBLY_POOL_SIZE`.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> JoblyResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| JoblyError::config("DATABASE_URL is not set"))?;

        let pool_max_size = match std::env::var("JOBLY_POOL_SIZE") {
            Ok(raw) => raw.trim().parse().map_err(|e| {
                JoblyError::config(format!("invalid JOBLY_POOL_SIZE '{raw}': {e}"))
            })?,
            Err(_) => DEFAULT_POOL_MAX_SIZE,
        };

        let config = Self {
            database_url,
            pool_max_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; `${VAR}` references are expanded from the environment.
    pub fn from_toml_str(raw: &str) -> JoblyResult<Self> {
        let file: ConfigFile = toml::from_str(raw)
            .map_err(|e| JoblyError::config(format!("failed to parse config: {e}")))?;

        let config = Self {
            database_url: expand_env_vars(&file.database.url)?,
            pool_max_size: file.database.pool_max_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> JoblyResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            JoblyError::config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> JoblyResult<()> {
        if self.database_url.trim().is_empty() {
            return Err(JoblyError::config("database url must not be empty"));
        }
        if self.pool_max_size == 0 {
            return Err(JoblyError::config("pool_max_size must be at least 1"));
        }
        Ok(())
    }
}

fn expand_env_vars(input: &str) -> JoblyResult<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                return Err(JoblyError::config(format!(
                    "unterminated env var reference: ${{{key}}}"
                )));
            }
            if key.is_empty() {
                return Err(JoblyError::config("invalid env var reference: ${}"));
            }

            let v = std::env::var(&key).map_err(|_| {
                JoblyError::config(format!("missing env var for config expansion: {key}"))
            })?;
            out.push_str(&v);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}
