use std::sync::LazyLock;

use async_trait::async_trait;
use redis_connection::{
    AsyncCommands, Script,
    connection::{RedisConnect, RedisConnectionManager},
};
use tracing::instrument;
use user_errors::RepositoryError;
use user_models::{UpdateUser, User};
use user_usecase::UserRepository;

use crate::Table;

/// Merges the supplied fields into the stored record in one round trip.
/// Returns 0 when the record does not exist.
static MERGE_FIELDS: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
        local current = redis.call('HGET', KEYS[1], ARGV[1])
        if not current then
            return 0
        end
        local user = cjson.decode(current)
        for field, value in pairs(cjson.decode(ARGV[2])) do
            if field ~= 'id' then
                user[field] = value
            end
        end
        redis.call('HSET', KEYS[1], ARGV[1], cjson.encode(user))
        return 1
        "#,
    )
});

/// Stores each user as JSON in a single hash keyed by [`Table::key`].
#[derive(Clone)]
pub struct UserDao {
    redis: RedisConnectionManager,
    key: String,
}

impl UserDao {
    pub fn new(redis: RedisConnectionManager, table: &Table) -> Self {
        Self {
            redis,
            key: table.key(),
        }
    }

    pub fn key(&self) -> &str { &self.key }
}

#[async_trait]
impl UserRepository for UserDao {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<User, RepositoryError> {
        let mut conn = self.redis.get_connection().await?;
        let raw: Option<String> = conn.hget(&self.key, id).await?;

        let raw = raw.ok_or_else(|| RepositoryError::not_found(id))?;
        Ok(serde_json::from_str(&raw)?)
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.redis.get_connection().await?;
        let raw: Vec<String> = conn.hvals(&self.key).await?;

        let users = raw
            .iter()
            .map(|record| serde_json::from_str(record))
            .collect::<Result<Vec<User>, _>>()?;

        Ok(users)
    }

    #[instrument(skip_all, fields(user.id = %user.id))]
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let record = serde_json::to_string(user)?;
        let mut conn = self.redis.get_connection().await?;
        let _: () = conn.hset(&self.key, &user.id, record).await?;

        Ok(())
    }

    #[instrument(skip(self, user))]
    async fn update(
        &self, id: &str, user: &UpdateUser,
    ) -> Result<(), RepositoryError> {
        let patch = serde_json::to_string(user)?;
        let mut conn = self.redis.get_connection().await?;
        let updated: i64 = MERGE_FIELDS
            .key(&self.key)
            .arg(id)
            .arg(patch)
            .invoke_async(&mut conn)
            .await?;

        if updated == 0 {
            return Err(RepositoryError::not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut conn = self.redis.get_connection().await?;
        let removed: i64 = conn.hdel(&self.key, id).await?;

        if removed == 0 {
            return Err(RepositoryError::not_found(id));
        }

        Ok(())
    }
}
