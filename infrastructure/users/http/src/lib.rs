use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use bytes::Bytes;
use tracing::{error, instrument};
use user_delivery::{DispatchError, Dispatched, dispatch};
use user_models::{UpdateUser, User};
use user_usecase::UserService;

#[derive(Clone)]
pub struct UserServices {
    service: Arc<dyn UserService>,
}

impl UserServices {
    pub fn new(service: Arc<dyn UserService>) -> Self { Self { service } }

    async fn dispatch(
        &self, method: Method, id: Option<&str>, body: Option<&[u8]>,
    ) -> HttpReply {
        HttpReply(dispatch(&*self.service, &method, id, body).await)
    }
}

pub struct UserHandlers;

impl UserHandlers {
    pub fn routes() -> Router<UserServices> {
        Router::new()
            .route("/users", get(list_users).post(create_user))
            .route(
                "/users/{id}",
                get(get_user).put(update_user).delete(delete_user),
            )
    }
}

/// Writes the dispatch outcome as a plain HTTP response. Failures of any
/// kind are a 500 with the error text as body.
pub struct HttpReply(pub Result<Dispatched, DispatchError>);

impl IntoResponse for HttpReply {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(dispatched) => {
                let status = dispatched.status();
                match dispatched {
                    Dispatched::Fetched(user) | Dispatched::Created(user) => {
                        (status, Json(user)).into_response()
                    }
                    Dispatched::Listed(users) => {
                        (status, Json(users)).into_response()
                    }
                    Dispatched::Updated => status.into_response(),
                    Dispatched::Deleted => (status, "Deleted").into_response(),
                }
            }
            Err(err) => {
                error!(error = %err, "user request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                    .into_response()
            }
        }
    }
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = User,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 500, description = "Invalid body, validation or storage failure", body = String)
    ),
    tag = "users"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(services): State<UserServices>, body: Bytes,
) -> HttpReply {
    services.dispatch(Method::POST, None, Some(&body[..])).await
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, description = "Storage failure", body = String)
    ),
    tag = "users"
)]
#[instrument(skip_all)]
pub async fn list_users(State(services): State<UserServices>) -> HttpReply {
    services.dispatch(Method::GET, None, None).await
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 500, description = "User not found or storage failure", body = String)
    ),
    tag = "users"
)]
#[instrument(skip_all, fields(user.id = %id))]
pub async fn get_user(
    State(services): State<UserServices>, Path(id): Path<String>,
) -> HttpReply {
    services.dispatch(Method::GET, Some(id.as_str()), None).await
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    request_body = UpdateUser,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User updated successfully"),
        (status = 500, description = "Invalid body, validation or storage failure", body = String)
    ),
    tag = "users"
)]
#[instrument(skip_all, fields(user.id = %id))]
pub async fn update_user(
    State(services): State<UserServices>, Path(id): Path<String>, body: Bytes,
) -> HttpReply {
    services.dispatch(Method::PUT, Some(id.as_str()), Some(&body[..])).await
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully", body = String),
        (status = 500, description = "User not found or storage failure", body = String)
    ),
    tag = "users"
)]
#[instrument(skip_all, fields(user.id = %id))]
pub async fn delete_user(
    State(services): State<UserServices>, Path(id): Path<String>,
) -> HttpReply {
    services.dispatch(Method::DELETE, Some(id.as_str()), None).await
}
