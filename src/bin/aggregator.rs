use std::sync::Arc;

use anyhow::Context;
use hello_world::config::{AggregatorConfig, LISTEN_PORT};
use hello_world::core::aggregate;
use hello_world::utils::{host, logger};
use hello_world::AggregatorState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_service_logger();

    let config = AggregatorConfig::from_env().context("invalid aggregator configuration")?;
    tracing::info!(
        "Starting aggregator (hello: {}, world: {})",
        config.hello_svc,
        config.world_svc
    );

    let state = Arc::new(AggregatorState::new(config, host::local_hostname()));
    let app = aggregate::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", LISTEN_PORT))
        .await
        .with_context(|| format!("failed to bind port {}", LISTEN_PORT))?;
    tracing::info!("aggregator listening on port {}", LISTEN_PORT);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
