pub mod config;

use std::sync::Arc;

use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use user_http::{UserHandlers, UserServices};
use user_usecase::UserService;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

pub use crate::config::ServerConfig;

/// Full application router: user routes, health check and API docs.
pub fn app(service: Arc<dyn UserService>) -> Router {
    let api_routes =
        UserHandlers::routes().with_state(UserServices::new(service));

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        user_http::create_user,
        user_http::list_users,
        user_http::get_user,
        user_http::update_user,
        user_http::delete_user
    ),
    components(schemas(user_models::User, user_models::UpdateUser)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management endpoints")
    ),
    info(
        title = "Users API",
        description = "CRUD service for user records",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = String)
    ),
    tag = "health"
)]
async fn health_check() -> impl IntoResponse { (StatusCode::OK, "OK") }
