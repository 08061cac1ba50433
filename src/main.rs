use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use reset_gateway::{http, Config};
use tracing::metadata::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let config = Config::parse();

    init_tracing();

    let verifier = config
        .verifier()
        .context("failed to construct reset code verifier")?;

    http::serve(Arc::new(verifier)).await
}
