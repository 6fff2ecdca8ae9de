use ai_llm_service::telemetry::{self, WORKSPACE_TARGETS};
use anyhow::Context;
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment may carry everything.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", Level::INFO))
        .with(telemetry::layer(WORKSPACE_TARGETS))
        .try_init()
        .context("installing tracing subscriber")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => info!("no .env file, using process environment"),
        Err(e) => return Err(e).context("reading .env"),
    }

    api::start().await.context("api server")?;
    Ok(())
}
