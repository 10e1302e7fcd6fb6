use std::{io::Read, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_dao::{StoreConfig, env_var, open_repository, parse_var};
use user_lambda::{ProxyRequest, handle};
use user_usecase::{ServiceMode, build_service};

#[derive(Parser)]
#[command(name = "invoke-users")]
#[command(about = "Run one API gateway proxy event through the users handler")]
struct Cli {
    /// Event JSON file; the event is read from stdin when omitted
    #[arg(short, long)]
    event: Option<PathBuf>,
}

fn read_event(cli: &Cli) -> Result<ProxyRequest> {
    let raw = match &cli.event {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };

    serde_json::from_str(&raw).context("parsing proxy event")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env_var("RUST_LOG").unwrap_or_else(|| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let request = read_event(&cli)?;

    let store = StoreConfig::from_env()?;
    let mode: ServiceMode =
        parse_var(&env_var, "SERVICE_MODE")?.unwrap_or_default();
    info!(store.key = %store.table.key(), %mode, "invoking users handler");

    let service = build_service(open_repository(&store).await?, mode);
    let response = handle(&*service, request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
