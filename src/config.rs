use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::error::WfError;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

impl FromStr for Environment {
    type Err = WfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(WfError::InvalidSetting {
                key: "APP_ENVIRONMENT",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApplicationSettings {
    pub bind_address: String,
    pub environment: Environment,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub connect_retries: u32,
    pub max_retry_delay: Duration,
    pub seed_sample_forecasts: usize,
}

#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub filter: String,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Reads settings from the process environment, including anything loaded from `.env`.
    pub fn from_env() -> Result<Self, WfError> {
        Self::from_lookup(|key| dotenvy::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, WfError>
    where
        F: Fn(&str) -> Result<String, dotenvy::Error>,
    {
        let optional = |key: &str| match lookup(key) {
            Ok(value) => Ok(Some(value)),
            Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
            Err(e) => Err(WfError::from(e)),
        };

        let environment = match optional("APP_ENVIRONMENT")? {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };
        let application = ApplicationSettings {
            bind_address: optional("BIND_ADDRESS")?
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            environment,
        };

        let database = DatabaseSettings {
            url: lookup("DATABASE_URL")?,
            max_connections: non_zero(
                "DB_MAX_CONNECTIONS",
                parse_or("DB_MAX_CONNECTIONS", optional("DB_MAX_CONNECTIONS")?, 5)?,
            )?,
            connect_retries: parse_or("DB_CONNECT_RETRIES", optional("DB_CONNECT_RETRIES")?, 5)?,
            max_retry_delay: Duration::from_secs(parse_or(
                "DB_MAX_RETRY_DELAY_SECS",
                optional("DB_MAX_RETRY_DELAY_SECS")?,
                30,
            )?),
            seed_sample_forecasts: parse_or(
                "SEED_SAMPLE_FORECASTS",
                optional("SEED_SAMPLE_FORECASTS")?,
                0,
            )?,
        };

        let filter = match optional("RUST_LOG")? {
            Some(filter) => filter,
            None => optional("LOG_FILTER")?.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };
        let telemetry = TelemetrySettings {
            filter,
            log_dir: optional("LOG_DIR")?.map(PathBuf::from),
        };

        Ok(Self {
            application,
            database,
            telemetry,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, WfError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| WfError::InvalidSetting { key, value }),
        None => Ok(default),
    }
}

/// The sqlx pool cannot be built with zero capacity.
fn non_zero(key: &'static str, value: u32) -> Result<u32, WfError> {
    if value == 0 {
        return Err(WfError::InvalidSetting {
            key,
            value: value.to_string(),
        });
    }
    Ok(value)
}
