use async_trait::async_trait;
use tracing::{error, info};
use user_errors::UserError;
use user_models::{UpdateUser, User};

use crate::service::UserService;

/// Wraps any [`UserService`] with structured log events. Results pass
/// through untouched.
#[derive(Clone)]
pub struct LoggerAdapter<S> {
    inner: S,
}

impl<S> LoggerAdapter<S>
where
    S: UserService,
{
    pub fn new(inner: S) -> Self { Self { inner } }
}

fn log_err(err: &UserError) {
    error!(
        error = %err,
        validation = err.is_validation(),
        "user operation failed"
    );
}

#[async_trait]
impl<S> UserService for LoggerAdapter<S>
where
    S: UserService,
{
    async fn get(&self, id: &str) -> Result<User, UserError> {
        info!(user.id = id, "getting a single user");
        self.inner.get(id).await.inspect_err(log_err)
    }

    async fn get_all(&self) -> Result<Vec<User>, UserError> {
        info!("getting all users");
        self.inner.get_all().await.inspect_err(log_err)
    }

    async fn create(&self, user: User) -> Result<User, UserError> {
        info!("creating a single user");
        self.inner.create(user).await.inspect_err(log_err)
    }

    async fn update(
        &self, id: &str, user: UpdateUser,
    ) -> Result<(), UserError> {
        info!(user.id = id, "updating a single user");
        self.inner.update(id, user).await.inspect_err(log_err)
    }

    async fn delete(&self, id: &str) -> Result<(), UserError> {
        info!(user.id = id, "deleting a single user");
        self.inner.delete(id).await.inspect_err(log_err)
    }
}
