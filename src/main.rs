use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use freshnest_web::config::Config;
use freshnest_web::pricing::{self, PricingCatalog, QuoteOptions};
use freshnest_web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => {
            info!("Loading pricing catalog from {}", path.display());
            PricingCatalog::from_json_file(path)?
        }
        None => {
            info!("Using built-in pricing catalog");
            PricingCatalog::default()
        }
    };

    let state = AppState {
        catalog: Arc::new(catalog),
        options: QuoteOptions { auto_apply_upgrades: config.auto_apply_upgrades },
    };

    let app = pricing::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Pricing service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
