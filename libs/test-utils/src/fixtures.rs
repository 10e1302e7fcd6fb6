use serde_json::{Value, json};
use user_models::User;

/// A user that passes every validation rule, without an id.
pub fn valid_user() -> User { User::new("test@test.com", "Test User", 30) }

/// A stored user with the given id.
pub fn stored_user(id: &str) -> User {
    User {
        id: id.to_string(),
        ..valid_user()
    }
}

/// Create payload as a client would send it.
pub fn create_user_body() -> Value {
    json!({
        "name": "Test User",
        "email": "test@test.com",
        "age": 30
    })
}
