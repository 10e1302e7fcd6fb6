use std::sync::Arc;

use async_trait::async_trait;
use user_errors::RepositoryError;
use user_models::{UpdateUser, User};

/// Persistence port the usecase depends on.
///
/// Every call is a future; dropping it before completion abandons the
/// underlying store request, which is how deadlines and client disconnects
/// reach the adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, id: &str) -> Result<User, RepositoryError>;

    /// Order is whatever the store yields.
    async fn get_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// Persists a full record whose `id` is already assigned.
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    /// Applies only the supplied fields of `user`; `id` is never modified.
    async fn update(
        &self, id: &str, user: &UpdateUser,
    ) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<T> UserRepository for Arc<T>
where
    T: UserRepository + ?Sized,
{
    async fn get(&self, id: &str) -> Result<User, RepositoryError> {
        (**self).get(id).await
    }

    async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        (**self).get_all().await
    }

    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        (**self).create(user).await
    }

    async fn update(
        &self, id: &str, user: &UpdateUser,
    ) -> Result<(), RepositoryError> {
        (**self).update(id, user).await
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        (**self).delete(id).await
    }
}
