use user_dao::{ConfigError, StoreConfig, env_var, parse_var};
use user_usecase::ServiceMode;

const DEFAULT_PORT: u16 = 8080;

/// Startup settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub mode: ServiceMode,
    pub store: StoreConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parse_var(lookup, "PORT")?.unwrap_or(DEFAULT_PORT),
            mode: parse_var(lookup, "SERVICE_MODE")?.unwrap_or_default(),
            store: StoreConfig::from_lookup(lookup)?,
        })
    }
}
