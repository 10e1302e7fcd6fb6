use std::time::Duration;

use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use user_errors::UserError;
use user_models::{UpdateUser, User};
use user_usecase::UserService;

/// Upper bound on every downstream usecase call.
pub const DISPATCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    GetAll,
    Get(String),
    Create,
    Update(String),
    Delete(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("id parameter missing")]
    MissingId,
    #[error("invalid method")]
    InvalidMethod,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Routing(#[from] RoutingError),
    #[error("{0}")]
    Decode(#[source] serde_json::Error),
    #[error(transparent)]
    Usecase(#[from] UserError),
    #[error("deadline exceeded after {}s", .0.as_secs())]
    DeadlineExceeded(Duration),
}

/// Successful outcome of a dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Fetched(User),
    Listed(Vec<User>),
    Created(User),
    Updated,
    Deleted,
}

impl Dispatched {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Fetched(_) | Self::Listed(_) => StatusCode::OK,
            Self::Created(_) => StatusCode::CREATED,
            Self::Updated | Self::Deleted => StatusCode::NO_CONTENT,
        }
    }
}

/// Picks the usecase operation from the verb and whether an id path
/// parameter is present. An empty id counts as absent.
pub fn route(method: &Method, id: Option<&str>) -> Result<Route, RoutingError> {
    let id = id.filter(|id| !id.is_empty()).map(str::to_owned);
    match *method {
        Method::GET => Ok(id.map_or(Route::GetAll, Route::Get)),
        Method::POST => Ok(Route::Create),
        Method::PUT => id.map(Route::Update).ok_or(RoutingError::MissingId),
        Method::DELETE => {
            id.map(Route::Delete).ok_or(RoutingError::MissingId)
        }
        _ => Err(RoutingError::InvalidMethod),
    }
}

pub async fn dispatch<S>(
    service: &S, method: &Method, id: Option<&str>, body: Option<&[u8]>,
) -> Result<Dispatched, DispatchError>
where
    S: UserService + ?Sized,
{
    dispatch_with_timeout(service, method, id, body, DISPATCH_TIMEOUT).await
}

/// Same as [`dispatch`] with an explicit deadline. When it fires the usecase
/// future is dropped, which abandons the in-flight store call.
pub async fn dispatch_with_timeout<S>(
    service: &S, method: &Method, id: Option<&str>, body: Option<&[u8]>,
    timeout: Duration,
) -> Result<Dispatched, DispatchError>
where
    S: UserService + ?Sized,
{
    let route = route(method, id)?;
    debug!(?route, "dispatching user request");

    let call = async {
        let dispatched = match route {
            Route::GetAll => Dispatched::Listed(service.get_all().await?),
            Route::Get(id) => Dispatched::Fetched(service.get(&id).await?),
            Route::Create => {
                let user: User = decode(body)?;
                Dispatched::Created(service.create(user).await?)
            }
            Route::Update(id) => {
                let user: UpdateUser = decode(body)?;
                service.update(&id, user).await?;
                Dispatched::Updated
            }
            Route::Delete(id) => {
                service.delete(&id).await?;
                Dispatched::Deleted
            }
        };
        Ok::<_, DispatchError>(dispatched)
    };

    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "user request timed out");
            Err(DispatchError::DeadlineExceeded(timeout))
        }
    }
}

fn decode<T>(body: Option<&[u8]>) -> Result<T, DispatchError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body.unwrap_or_default())
        .map_err(DispatchError::Decode)
}
