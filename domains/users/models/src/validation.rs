use std::sync::LazyLock;

use regex::Regex;
use user_errors::{Rule, ValidationErrors, Violation};

use crate::{UpdateUser, User};

pub const NAME_MIN_LENGTH: usize = 1;
pub const NAME_MAX_LENGTH: usize = 50;
pub const AGE_MAX: u32 = 130;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

/// Checks a candidate value without touching any shared state.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Validate for User {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let violations = [
            check_email(&self.email),
            check_required_name(&self.name),
            check_age(self.age),
        ];
        collect(violations)
    }
}

impl Validate for UpdateUser {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let violations = [
            self.name.as_deref().and_then(check_name_length),
            self.age.and_then(check_age),
        ];
        collect(violations)
    }
}

pub fn is_email(value: &str) -> bool { EMAIL.is_match(value) }

fn collect<const N: usize>(
    violations: [Option<Violation>; N],
) -> Result<(), ValidationErrors> {
    let violations: Vec<Violation> = violations.into_iter().flatten().collect();
    if violations.is_empty() {
        Ok(())
    }
    else {
        Err(ValidationErrors::new(violations))
    }
}

fn check_email(email: &str) -> Option<Violation> {
    let rule = if email.is_empty() {
        Rule::Required
    }
    else if !is_email(email) {
        Rule::Email
    }
    else {
        return None;
    };
    Some(Violation {
        field: "email",
        rule,
    })
}

fn check_required_name(name: &str) -> Option<Violation> {
    if name.is_empty() {
        return Some(Violation {
            field: "name",
            rule: Rule::Required,
        });
    }
    check_name_length(name)
}

fn check_name_length(name: &str) -> Option<Violation> {
    let length = name.chars().count();
    let rule = if length < NAME_MIN_LENGTH {
        Rule::MinLength(NAME_MIN_LENGTH)
    }
    else if length > NAME_MAX_LENGTH {
        Rule::MaxLength(NAME_MAX_LENGTH)
    }
    else {
        return None;
    };
    Some(Violation {
        field: "name",
        rule,
    })
}

fn check_age(age: u32) -> Option<Violation> {
    (age > AGE_MAX).then_some(Violation {
        field: "age",
        rule: Rule::Max(AGE_MAX),
    })
}
