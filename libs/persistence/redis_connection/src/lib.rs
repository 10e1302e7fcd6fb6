use deadpool_redis::{Config, CreatePoolError, Pool, Runtime};
pub use deadpool_redis::PoolError;
pub use redis::{self, AsyncCommands, RedisError, Script};
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;
pub mod config;
pub mod connection;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid redis url: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid redis url: cannot set {0}")]
    UrlPart(&'static str),
    #[error("failed to create redis pool: {0}")]
    Pool(#[from] CreatePoolError),
}

/// Builds the connection URL. The password is percent-encoded, so any
/// character is allowed in it.
pub fn redis_url<C>(config: &C) -> Result<Url, ConnectError>
where
    C: config::DbConnectConfig,
{
    let mut url = Url::parse("redis://")?;

    url.set_host(Some(config.host()))?;
    url.set_port(Some(config.port()))
        .map_err(|()| ConnectError::UrlPart("port"))?;
    if let Some(password) = config.password() {
        url.set_password(Some(password))
            .map_err(|()| ConnectError::UrlPart("password"))?;
    }
    url.path_segments_mut()
        .map_err(|()| ConnectError::UrlPart("db"))?
        .push(&config.db().to_string());

    Ok(url)
}

#[instrument(skip_all, name = "connect-redis")]
pub async fn connect_redis_db<C>(config: &C) -> Result<Pool, ConnectError>
where
    C: config::DbConnectConfig,
{
    let url = redis_url(config)?;

    info!(
        redis.host = config.host(),
        redis.port = config.port(),
        redis.connect = true
    );

    let cfg = Config {
        url: Some(url.to_string()),
        pool: Some(deadpool_redis::PoolConfig::default()),
        connection: None,
    };

    let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
    Ok(pool)
}
