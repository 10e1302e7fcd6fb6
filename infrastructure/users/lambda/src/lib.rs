//! API gateway proxy adapter. Events are routed through the same dispatcher
//! as the HTTP server and answered with JSON envelopes.

mod event;

pub use event::{ProxyRequest, ProxyResponse};
use http::Method;
use thiserror::Error;
use tracing::{info, instrument};
use user_delivery::{RoutingError, dispatch_envelope};
use user_usecase::UserService;

/// Failures reported to the platform as a failed invocation rather than as
/// a response.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Routing(#[from] RoutingError),
    #[error("invalid base64 body: {0}")]
    Body(#[from] base64::DecodeError),
}

#[instrument(skip_all, fields(http.method = %request.http_method))]
pub async fn handle<S>(
    service: &S, request: ProxyRequest,
) -> Result<ProxyResponse, HandlerError>
where
    S: UserService + ?Sized,
{
    let method = Method::from_bytes(request.http_method.as_bytes())
        .map_err(|_| RoutingError::InvalidMethod)?;
    let body = request.decoded_body()?;

    let reply =
        dispatch_envelope(service, &method, request.id(), body.as_deref())
            .await?;
    info!(status = reply.status.as_u16(), "proxy event handled");

    Ok(reply.into())
}
