use std::sync::Arc;

use async_trait::async_trait;
use deadpool_redis::{Connection, Pool, PoolError};

#[async_trait]
pub trait RedisConnect {
    async fn get_connection(&self) -> Result<Connection, PoolError>;
}

/// Cloneable handle over the shared pool; safe to hand to every request.
#[derive(Clone)]
pub struct RedisConnectionManager {
    pool: Pool,
}

impl RedisConnectionManager {
    pub fn new(pool: Pool) -> Self { Self { pool } }
}

#[async_trait]
impl RedisConnect for RedisConnectionManager {
    async fn get_connection(&self) -> Result<Connection, PoolError> {
        self.pool.get().await
    }
}

#[async_trait]
impl<T> RedisConnect for Arc<T>
where
    T: RedisConnect + Send + Sync,
{
    async fn get_connection(&self) -> Result<Connection, PoolError> {
        (**self).get_connection().await
    }
}
