//! # promo-engine
//!
//! Checkout pricing service.
//!
//! ## Usage
//!
//! ```bash
//! # Optional: point at a campaign catalog
//! export CAMPAIGNS_FILE=config/campaigns.toml
//!
//! # Run the server
//! promo-engine
//! ```

use promo_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Campaigns loaded: {}", state.catalog.len());

    let app = routes::create_router(state);

    info!("promo-engine v{} starting on http://{}", env!("CARGO_PKG_VERSION"), addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Price: POST http://{}/api/v1/price", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
