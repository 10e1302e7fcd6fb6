use std::sync::Arc;

use async_trait::async_trait;
use user_errors::UserError;
use user_models::{UpdateUser, User, Validate};
use uuid::Uuid;

use crate::repository::UserRepository;

/// Operations exposed to the delivery adapters.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get(&self, id: &str) -> Result<User, UserError>;

    async fn get_all(&self) -> Result<Vec<User>, UserError>;

    /// Validates `user`, assigns a fresh id and persists it. Any id carried
    /// by the input is discarded.
    async fn create(&self, user: User) -> Result<User, UserError>;

    async fn update(&self, id: &str, user: UpdateUser)
    -> Result<(), UserError>;

    async fn delete(&self, id: &str) -> Result<(), UserError>;
}

#[async_trait]
impl<T> UserService for Arc<T>
where
    T: UserService + ?Sized,
{
    async fn get(&self, id: &str) -> Result<User, UserError> {
        (**self).get(id).await
    }

    async fn get_all(&self) -> Result<Vec<User>, UserError> {
        (**self).get_all().await
    }

    async fn create(&self, user: User) -> Result<User, UserError> {
        (**self).create(user).await
    }

    async fn update(
        &self, id: &str, user: UpdateUser,
    ) -> Result<(), UserError> {
        (**self).update(id, user).await
    }

    async fn delete(&self, id: &str) -> Result<(), UserError> {
        (**self).delete(id).await
    }
}

#[derive(Clone)]
pub struct Usecase<R> {
    repository: R,
}

impl<R> Usecase<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self { Self { repository } }

    fn new_id() -> String { Uuid::new_v4().to_string() }
}

#[async_trait]
impl<R> UserService for Usecase<R>
where
    R: UserRepository,
{
    async fn get(&self, id: &str) -> Result<User, UserError> {
        self.repository.get(id).await.map_err(|err| {
            UserError::repository("error fetching a single user", err)
        })
    }

    async fn get_all(&self) -> Result<Vec<User>, UserError> {
        self.repository
            .get_all()
            .await
            .map_err(|err| UserError::repository("error fetching all users", err))
    }

    async fn create(&self, mut user: User) -> Result<User, UserError> {
        user.validate()?;

        user.id = Self::new_id();
        self.repository
            .create(&user)
            .await
            .map_err(|err| UserError::repository("error creating new user", err))?;

        Ok(user)
    }

    async fn update(
        &self, id: &str, user: UpdateUser,
    ) -> Result<(), UserError> {
        user.validate()?;

        self.repository
            .update(id, &user)
            .await
            .map_err(|err| UserError::repository("error updating user", err))
    }

    async fn delete(&self, id: &str) -> Result<(), UserError> {
        self.repository
            .delete(id)
            .await
            .map_err(|err| UserError::repository("error deleting user", err))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use user_errors::RepositoryError;

    use super::*;
    use crate::repository::MockUserRepository;

    fn valid_user() -> User { User::new("test@test.com", "Test User", 30) }

    #[tokio::test]
    async fn test_can_get_user() {
        let expected = User {
            id: "abc123".to_string(),
            ..valid_user()
        };
        let returned = expected.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_get()
            .withf(|id| id == "abc123")
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let usecase = Usecase::new(repo);
        let user = usecase.get("abc123").await.unwrap();

        assert_eq!(user, expected);
    }

    #[tokio::test]
    async fn test_get_wraps_repository_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_get()
            .returning(|id| Err(RepositoryError::not_found(id)));

        let usecase = Usecase::new(repo);
        let err = usecase.get("missing").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "error fetching a single user: user not found: missing"
        );
    }

    #[tokio::test]
    async fn test_can_get_all_users_unmodified() {
        let expected = vec![
            User {
                id: "2".to_string(),
                ..User::new("b@test.com", "test2", 2)
            },
            User {
                id: "1".to_string(),
                ..User::new("a@test.com", "test1", 1)
            },
        ];
        let returned = expected.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_get_all()
            .times(1)
            .returning(move || Ok(returned.clone()));

        let usecase = Usecase::new(repo);
        let users = usecase.get_all().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users, expected);
    }

    #[tokio::test]
    async fn test_get_all_wraps_repository_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_all().returning(|| {
            Err(RepositoryError::Serialization(
                serde_json_error("not json"),
            ))
        });

        let usecase = Usecase::new(repo);
        let err = usecase.get_all().await.unwrap_err();

        assert!(!err.is_validation());
        assert!(err.to_string().starts_with("error fetching all users: "));
    }

    #[tokio::test]
    async fn test_can_create_user() {
        let persisted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&persisted);

        let mut repo = MockUserRepository::new();
        repo.expect_create().times(1).returning(move |user| {
            sink.lock().unwrap().push(user.clone());
            Ok(())
        });

        let usecase = Usecase::new(repo);
        let created = usecase
            .create(User {
                id: "caller-supplied".to_string(),
                ..valid_user()
            })
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert_ne!(created.id, "caller-supplied");
        assert_eq!(created.email, "test@test.com");
        assert_eq!(created.name, "Test User");
        assert_eq!(created.age, 30);
        assert_eq!(*persisted.lock().unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().times(2).returning(|_| Ok(()));

        let usecase = Usecase::new(repo);
        let first = usecase.create(valid_user()).await.unwrap();
        let second = usecase.create(valid_user()).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_can_validate_user() {
        let invalid = [
            ("zero value", User::default()),
            ("empty name", User {
                name: String::new(),
                ..valid_user()
            }),
            ("age too high", User {
                age: 200,
                ..valid_user()
            }),
            ("malformed email", User {
                email: "not-an-email".to_string(),
                ..valid_user()
            }),
        ];

        for (case, user) in invalid {
            let mut repo = MockUserRepository::new();
            repo.expect_create().never();

            let usecase = Usecase::new(repo);
            let err = usecase.create(user).await.unwrap_err();

            assert!(err.is_validation(), "{case}: {err}");
        }
    }

    #[tokio::test]
    async fn test_create_wraps_repository_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|user| Err(RepositoryError::not_found(&user.id)));

        let usecase = Usecase::new(repo);
        let err = usecase.create(valid_user()).await.unwrap_err();

        assert!(err.to_string().starts_with("error creating new user: "));
    }

    #[tokio::test]
    async fn test_can_update_user() {
        let update = UpdateUser {
            name: Some("Renamed".to_string()),
            age: Some(31),
            ..Default::default()
        };
        let expected = update.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .withf(move |id, user| id == "abc123" && *user == expected)
            .times(1)
            .returning(|_, _| Ok(()));

        let usecase = Usecase::new(repo);

        assert!(usecase.update("abc123", update).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_payload() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();

        let usecase = Usecase::new(repo);
        let err = usecase
            .update("abc123", UpdateUser {
                name: Some("x".repeat(51)),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_update_does_not_check_existence_first() {
        let mut repo = MockUserRepository::new();
        repo.expect_get().never();
        repo.expect_update()
            .returning(|id, _| Err(RepositoryError::not_found(id)));

        let usecase = Usecase::new(repo);
        let err = usecase
            .update("missing", UpdateUser::default())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "error updating user: user not found: missing"
        );
    }

    #[tokio::test]
    async fn test_can_delete_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .withf(|id| id == "abc123")
            .times(1)
            .returning(|_| Ok(()));

        let usecase = Usecase::new(repo);

        assert!(usecase.delete("abc123").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_wraps_repository_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .returning(|id| Err(RepositoryError::not_found(id)));

        let usecase = Usecase::new(repo);
        let err = usecase.delete("abc123").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "error deleting user: user not found: abc123"
        );
    }

    fn serde_json_error(input: &str) -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>(input).unwrap_err()
    }
}
