use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod validation;

pub use validation::Validate;

#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
pub struct User {
    /// Assigned by the service on creation; ignored on input.
    #[serde(default)]
    pub id: String,
    pub email: String,
    pub name: String,
    pub age: u32,
}

impl User {
    pub fn new(
        email: impl Into<String>, name: impl Into<String>, age: u32,
    ) -> Self {
        Self {
            id: String::new(),
            email: email.into(),
            name: name.into(),
            age,
        }
    }

    /// Overwrites the supplied fields, leaving `id` untouched.
    pub fn apply(&mut self, update: UpdateUser) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
    }
}

/// Partial mutation payload; absent fields are left as stored.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}
