use hookscope_core::{seed, Inspector};
use hookscope_server::{config, routes, simulator};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hookscope_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Starting hookscope server on {}:{}", config.host, config.port);
    tracing::info!("Public URL: {}", config.public_url);

    let inspector = Arc::new(
        Inspector::new(&config.public_url).with_filter_semantics(config.filter_semantics),
    );

    if config.seed_sample_data {
        seed::seed_sample_data(&inspector).await;
        tracing::info!("Loaded sample dataset");
    }

    if config.simulate_interval_secs > 0 {
        simulator::spawn(inspector.clone(), config.simulate_interval_secs);
        tracing::info!(
            "Traffic simulator enabled ({}s interval)",
            config.simulate_interval_secs
        );
    }

    let state = routes::AppState {
        config: Arc::new(config.clone()),
        inspector,
    };
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
