use std::sync::Arc;

use counter_client::{CounterClient, CounterConfig};
use skill::Skill;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from `.env` if present so local
    // development picks up the counter service settings.
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_string = format!(
        "warn,server={level},skill={level},counter_client={level}",
        level = log_level
    );
    let env_filter = EnvFilter::try_new(filter_string)?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let counter_config = CounterConfig::from_env();
    tracing::info!(
        "counter service backend {:?} at {}",
        counter_config.backend,
        counter_config.service_url
    );
    let skill = Arc::new(Skill::new(CounterClient::from_config(&counter_config)));

    let bind_addr =
        std::env::var("SKILL_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("skill endpoint listening on {}", bind_addr);

    axum::serve(listener, server::router(skill)).await?;

    Ok(())
}
