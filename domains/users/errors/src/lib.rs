use std::fmt;

use redis_connection::{PoolError, RedisError};
use thiserror::Error;

/// A single constraint a user field is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    MinLength(usize),
    MaxLength(usize),
    Max(u32),
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Email => write!(f, "email"),
            Self::MinLength(min) => write!(f, "min={min}"),
            Self::MaxLength(max) => write!(f, "max={max}"),
            Self::Max(max) => write!(f, "max={max}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: failed on '{}'", self.field, self.rule)
    }
}

/// Field violations in declaration order, at most one per field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join(.0))]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn new(violations: Vec<Violation>) -> Self { Self(violations) }

    pub fn violations(&self) -> &[Violation] { &self.0 }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|violation| violation.field)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("user not found: {id}")]
    NotFound { id: String },
    #[error("store error: {0}")]
    Redis(#[from] RedisError),
    #[error("store pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("record encoding error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RepositoryError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl UserError {
    pub fn repository(context: &'static str, source: RepositoryError) -> Self {
        Self::Repository { context, source }
    }

    /// Validation failures are raised before any store call; callers use this
    /// to tell client mistakes apart from storage failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Repository { source, .. } => source.is_not_found(),
            Self::Validation(_) => false,
        }
    }
}
