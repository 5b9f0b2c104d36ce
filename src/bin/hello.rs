use std::sync::Arc;

use anyhow::Context;
use hello_world::config::{LeafConfig, LISTEN_PORT};
use hello_world::core::leaf;
use hello_world::utils::{host, logger};
use hello_world::LeafService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_service_logger();

    let config = LeafConfig::from_env();
    let hostname = host::local_hostname();
    tracing::info!("Starting hello leaf (lang: {}, host: {})", config.lang, hostname);

    let service = Arc::new(LeafService::hello(&config, hostname));
    let app = leaf::router(service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", LISTEN_PORT))
        .await
        .with_context(|| format!("failed to bind port {}", LISTEN_PORT))?;
    tracing::info!("hello leaf listening on port {}", LISTEN_PORT);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
