use std::{fmt, str::FromStr, sync::Arc};

use redis_connection::{
    ConnectError, config::RedisDbConfig, connect_redis_db,
    connection::RedisConnectionManager,
};
use thiserror::Error;
use tracing::info;
use user_usecase::UserRepository;

use crate::{InMemoryUserDao, Table, UserDao};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err("expected 'redis' or 'memory'".to_string()),
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Where user records live, read from `AWS_REGION`, `TABLE_NAME`,
/// `STORE_BACKEND` and the `REDIS_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub table: Table,
    pub backend: StoreBackend,
    pub redis: RedisDbConfig,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RedisDbConfig::default();

        Ok(Self {
            table: Table::new(
                lookup("AWS_REGION").unwrap_or_else(|| "local".to_string()),
                lookup("TABLE_NAME").unwrap_or_else(|| "users".to_string()),
            ),
            backend: parse_var(lookup, "STORE_BACKEND")?.unwrap_or_default(),
            redis: RedisDbConfig {
                host: lookup("REDIS_HOST").unwrap_or(defaults.host),
                port: parse_var(lookup, "REDIS_PORT")?.unwrap_or(defaults.port),
                db: parse_var(lookup, "REDIS_DB")?.unwrap_or(defaults.db),
                password: lookup("REDIS_PASSWORD"),
            },
        })
    }
}

/// Process environment lookup. Empty values count as unset.
pub fn env_var(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}

/// Parses `var` when it is set.
pub fn parse_var<T, F>(
    lookup: &F, var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let Some(value) = lookup(var)
    else {
        return Ok(None);
    };

    match value.parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => Err(ConfigError {
            var,
            reason: err.to_string(),
            value,
        }),
    }
}

/// Opens the configured store. The Redis pool connects lazily, so an
/// unreachable server surfaces on the first request.
pub async fn open_repository(
    config: &StoreConfig,
) -> Result<Arc<dyn UserRepository>, ConnectError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("using in-memory user store");
            Ok(Arc::new(InMemoryUserDao::new()))
        }
        StoreBackend::Redis => {
            let pool = connect_redis_db(&config.redis).await?;
            let redis = RedisConnectionManager::new(pool);
            info!(store.key = %config.table.key(), "using redis user store");
            Ok(Arc::new(UserDao::new(redis, &config.table)))
        }
    }
}
