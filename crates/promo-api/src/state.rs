//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the campaign catalog and service configuration.

use promo_core::{CampaignCatalog, PricingError, PricingResult};
use std::path::Path;
use std::sync::Arc;

/// Locations searched for the catalog when `CAMPAIGNS_FILE` is not set
const CATALOG_PATHS: [&str; 3] = [
    "config/campaigns.toml",
    "../config/campaigns.toml",
    "../../config/campaigns.toml",
];

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit campaign catalog path
    pub campaigns_file: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            campaigns_file: std::env::var("CAMPAIGNS_FILE").ok(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> PricingResult<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| PricingError::Configuration(format!("Invalid socket address: {}", e)))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configured campaigns
    pub catalog: Arc<CampaignCatalog>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state from the environment, loading the campaign catalog
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let catalog = load_campaign_catalog(&config)?;

        Ok(Self::with_catalog(config, catalog))
    }

    /// Create state around an already loaded catalog
    pub fn with_catalog(config: AppConfig, catalog: CampaignCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config,
        }
    }
}

/// Load campaign catalog from config file
fn load_campaign_catalog(config: &AppConfig) -> anyhow::Result<CampaignCatalog> {
    if let Some(path) = &config.campaigns_file {
        return read_catalog(Path::new(path));
    }

    for path in CATALOG_PATHS {
        let path = Path::new(path);
        if path.exists() {
            return read_catalog(path);
        }
    }

    // Return empty catalog if no config found
    tracing::warn!("No campaign catalog found, using empty catalog");
    Ok(CampaignCatalog::new())
}

fn read_catalog(path: &Path) -> anyhow::Result<CampaignCatalog> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let catalog = CampaignCatalog::from_toml(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
    tracing::info!("Loaded {} campaigns from {}", catalog.len(), path.display());
    Ok(catalog)
}
