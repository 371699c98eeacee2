//! # Request Handlers
//!
//! Axum request handlers for the pricing API.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use promo_core::{
    calculate_final_price, Campaign, CampaignSpec, CartItem, DiscountLine, Money, PricingError,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use uuid::Uuid;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Price a cart request
#[derive(Debug, Deserialize)]
pub struct PriceRequest {
    /// Cart contents
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Campaigns from the configured catalog, by id
    #[serde(default)]
    pub campaign_ids: Vec<String>,
    /// Ad-hoc campaigns, evaluated after the catalog ones
    #[serde(default)]
    pub campaigns: Vec<CampaignSpec>,
}

/// Priced cart response
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    /// Identifier of this quote
    pub quote_id: Uuid,
    pub subtotal: Money,
    pub final_total: Money,
    pub lines: Vec<DiscountLine>,
    pub priced_at: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn pricing_error_to_response(err: PricingError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Reject carts the engine is not defined for
fn validate_items(items: &[CartItem]) -> Result<(), PricingError> {
    match items.iter().find(|item| item.unit_price < Money::ZERO) {
        Some(item) => Err(PricingError::InvalidRequest(format!(
            "Negative unit price for {}",
            item.sku
        ))),
        None => Ok(()),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "promo-engine",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Price a cart against catalog and inline campaigns
#[instrument(skip(state, request), fields(items = request.items.len()))]
pub async fn price_cart(
    State(state): State<AppState>,
    Json(request): Json<PriceRequest>,
) -> Result<Json<PriceResponse>, (StatusCode, Json<ErrorResponse>)> {
    validate_items(&request.items).map_err(pricing_error_to_response)?;

    let mut campaigns = state
        .catalog
        .resolve(&request.campaign_ids)
        .map_err(|e| {
            error!("Failed to resolve campaigns: {}", e);
            pricing_error_to_response(e)
        })?;
    campaigns.extend(request.campaigns.into_iter().map(Campaign::from));

    let result = calculate_final_price(&request.items, &campaigns);

    info!(
        "Priced cart: {} campaigns, subtotal={}, discounts={}, total={}",
        campaigns.len(),
        result.subtotal.display(),
        result.lines.len(),
        result.final_total.display()
    );

    Ok(Json(PriceResponse {
        quote_id: Uuid::new_v4(),
        subtotal: result.subtotal,
        final_total: result.final_total,
        lines: result.lines,
        priced_at: Utc::now(),
    }))
}

/// List configured campaigns
pub async fn list_campaigns(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "campaigns": state.catalog.campaigns,
        "count": state.catalog.len()
    }))
}

/// Get single campaign
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let spec = state.catalog.get(&campaign_id).ok_or_else(|| {
        pricing_error_to_response(PricingError::CampaignNotFound {
            campaign_id: campaign_id.clone(),
        })
    })?;

    let campaign = Campaign::from(spec);
    Ok(Json(serde_json::json!({
        "campaign": spec,
        "kind": campaign.kind(),
        "label": campaign.label()
    })))
}
