use std::{fmt, str::FromStr, sync::Arc};

use thiserror::Error;

use crate::{
    logger_adapter::LoggerAdapter,
    repository::UserRepository,
    service::{Usecase, UserService},
};

/// How the usecase is assembled at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceMode {
    /// The bare usecase, no log events.
    Plain,
    /// The usecase wrapped in [`LoggerAdapter`].
    #[default]
    Logged,
}

#[derive(Debug, Error)]
#[error("unknown service mode '{0}', expected 'plain' or 'logged'")]
pub struct UnknownServiceMode(String);

impl FromStr for ServiceMode {
    type Err = UnknownServiceMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "logged" => Ok(Self::Logged),
            _ => Err(UnknownServiceMode(value.to_string())),
        }
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Logged => write!(f, "logged"),
        }
    }
}

pub fn build_service<R>(repository: R, mode: ServiceMode) -> Arc<dyn UserService>
where
    R: UserRepository + 'static,
{
    let usecase = Usecase::new(repository);
    match mode {
        ServiceMode::Plain => Arc::new(usecase),
        ServiceMode::Logged => Arc::new(LoggerAdapter::new(usecase)),
    }
}
