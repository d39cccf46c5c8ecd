use std::{
    env,
    fmt::Display,
    num::{NonZeroU32, NonZeroU64},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use tracing::{info, warn};

use crate::error::AppError;

pub const PRODUCTION: &str = "production";
pub const DEVELOPMENT: &str = "development";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            PRODUCTION => Ok(Mode::Production),
            DEVELOPMENT => Ok(Mode::Development),
            other => Err(format!("expected {PRODUCTION} or {DEVELOPMENT}, got {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mode: Mode,
    pub reveal_offset_secs: NonZeroU32,
    pub static_dir: PathBuf,
    pub cases_path: Option<PathBuf>,
    pub keepalive_url: Option<String>,
    pub keepalive_interval: Duration,
    pub keepalive_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let keepalive_url = lookup("KEEPALIVE_URL")
            .or_else(|| lookup("RENDER_EXTERNAL_URL"))
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            port: try_load(&lookup, "PORT", "5000")?,
            mode: try_load(&lookup, "APP_ENV", DEVELOPMENT)?,
            reveal_offset_secs: try_load(&lookup, "REVEAL_OFFSET_SECS", "30")?,
            static_dir: try_load(&lookup, "STATIC_DIR", "frontend")?,
            cases_path: lookup("CASES_PATH").map(PathBuf::from),
            keepalive_url,
            keepalive_interval: load_secs(&lookup, "KEEPALIVE_INTERVAL_SECS", "840")?,
            keepalive_timeout: load_secs(&lookup, "KEEPALIVE_TIMEOUT_SECS", "30")?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.mode == Mode::Production
    }

    pub fn host(&self) -> &'static str {
        match self.mode {
            Mode::Production => "0.0.0.0",
            Mode::Development => "127.0.0.1",
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host(), self.port)
    }
}

fn load_secs<F>(lookup: &F, key: &str, default: &str) -> Result<Duration, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: NonZeroU64 = try_load(lookup, key, default)?;

    Ok(Duration::from_secs(secs.get()))
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");

        AppError::InvalidConfig {
            key: key.to_string(),
            value,
        }
    })
}
