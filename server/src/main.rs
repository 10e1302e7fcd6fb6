use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_dao::{env_var, open_repository};
use user_usecase::build_service;
use users_server::{ServerConfig, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env_var("RUST_LOG").unwrap_or_else(|| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        mode = %config.mode,
        backend = ?config.store.backend,
        store.key = %config.store.table.key(),
        "Initializing user service..."
    );

    let repository = open_repository(&config.store).await?;
    let service = build_service(repository, config.mode);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Users server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(service)).await?;

    Ok(())
}
