//! # Pricing Error Types
//!
//! The pipeline itself never fails: bad discount parameters are clamped or
//! skipped. These errors cover the edges around it, namely loading campaign
//! configuration and resolving pricing requests.

use thiserror::Error;

/// Error type for configuration and request handling
#[derive(Debug, Error)]
pub enum PricingError {
    /// Configuration errors (unreadable or malformed campaign files)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Campaign id not present in the catalog
    #[error("Campaign not found: {campaign_id}")]
    CampaignNotFound { campaign_id: String },

    /// Two campaigns share an id
    #[error("Duplicate campaign id: {campaign_id}")]
    DuplicateCampaign { campaign_id: String },

    /// Malformed pricing input (scenario files, request bodies)
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PricingError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PricingError::Configuration(_) => 500,
            PricingError::InvalidRequest(_) => 400,
            PricingError::CampaignNotFound { .. } => 404,
            PricingError::DuplicateCampaign { .. } => 409,
            PricingError::Serialization(_) => 400,
        }
    }
}

impl From<toml::de::Error> for PricingError {
    fn from(err: toml::de::Error) -> Self {
        PricingError::Configuration(err.to_string())
    }
}

/// Result type alias for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
