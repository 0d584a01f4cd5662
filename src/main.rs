use clap::Parser;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use metar_reader::config::{Args, Config};
use metar_reader::models::AppState;
use metar_reader::routes::create_router;
use metar_reader::services::AviationWeatherClient;

#[tokio::main]
async fn main() {
    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(2);
        }
    };

    setup_logging(&config);

    if let Err(message) = run(config).await {
        error!("{}", message);
        process::exit(1);
    }
}

// RUST_LOG wins over the configured level when it is set
fn setup_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_reader={}", config.log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(config: Config) -> Result<(), String> {
    let client = AviationWeatherClient::new(config.api_url.clone(), config.timeout)
        .map_err(|e| format!("failed to build http client: {}", e))?;
    let state = Arc::new(AppState {
        source: Arc::new(client),
    });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| format!("failed to bind {}: {}", config.bind, e))?;

    info!("Server running on http://{}", config.bind);
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {}", e))
}
