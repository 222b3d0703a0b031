//! CoachBook server entry point

use std::sync::Arc;

use anyhow::Context;
use coachbook_app::{routes, AppContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = coachbook_infra::config::load().context("failed to load configuration")?;
    let bind_addr = config.server.bind_addr.clone();

    let context = Arc::new(AppContext::build(config).context("failed to build app context")?);
    let app = routes::router(context);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    info!(%bind_addr, "coachbook server listening");
    axum::serve(listener, app).await.context("server terminated")?;

    Ok(())
}
