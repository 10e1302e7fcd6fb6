use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use user_errors::RepositoryError;
use user_models::{UpdateUser, User};
use user_usecase::UserRepository;

/// Process-local store with the same semantics as [`crate::UserDao`].
/// Records are listed in id order.
#[derive(Clone, Default)]
pub struct InMemoryUserDao {
    records: Arc<RwLock<BTreeMap<String, User>>>,
}

impl InMemoryUserDao {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize { self.records.read().await.len() }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserDao {
    async fn get(&self, id: &str) -> Result<User, RepositoryError> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(id))
    }

    async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        self.records
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update(
        &self, id: &str, user: &UpdateUser,
    ) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| RepositoryError::not_found(id))?;
        record.apply(user.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.records
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(id))
    }
}
