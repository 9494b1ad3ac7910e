//! Process settings read from the environment (and `.env` via dotenvy in the binary).

use crate::error::ConfigError;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/jobly";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BCRYPT_WORK_FACTOR: u32 = 12;
const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    /// HS256 signing secret for credential tokens. Required; there is no default.
    pub secret_key: String,
    pub port: u16,
    pub bcrypt_work_factor: u32,
    pub token_ttl_secs: i64,
    pub body_limit_bytes: usize,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url)
            .field("secret_key", &"<redacted>")
            .field("port", &self.port)
            .field("bcrypt_work_factor", &self.bcrypt_work_factor)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSetting("SECRET_KEY"))?;
        let bcrypt_work_factor = parse_or(&lookup, "BCRYPT_WORK_FACTOR", DEFAULT_BCRYPT_WORK_FACTOR)?;
        if !BCRYPT_COST_RANGE.contains(&bcrypt_work_factor) {
            return Err(ConfigError::InvalidSetting {
                name: "BCRYPT_WORK_FACTOR",
                reason: format!(
                    "must be between {} and {}",
                    BCRYPT_COST_RANGE.start(),
                    BCRYPT_COST_RANGE.end()
                ),
            });
        }
        let token_ttl_secs = parse_or(&lookup, "TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        if token_ttl_secs <= 0 {
            return Err(ConfigError::InvalidSetting {
                name: "TOKEN_TTL_SECS",
                reason: "must be positive".into(),
            });
        }
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            secret_key,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            bcrypt_work_factor,
            token_ttl_secs,
            body_limit_bytes: parse_or(&lookup, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidSetting {
            name,
            reason: e.to_string(),
        }),
    }
}
