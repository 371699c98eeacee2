//! # promo-core
//!
//! Campaign discount engine for checkout pricing.
//!
//! This crate provides:
//! - `Money` fixed-point amounts with cent rounding
//! - `CartItem` for the priced cart
//! - `Campaign` with its five rule constructors
//! - `pick_best` and `calculate_final_price` for the coupon → on top → seasonal pipeline
//! - `CampaignCatalog` for campaigns loaded from configuration
//! - `PricingError` for typed error handling at the edges
//!
//! ## Example
//!
//! ```rust
//! use promo_core::{calculate_final_price, Campaign, CartItem, Money};
//!
//! let cart = vec![
//!     CartItem::new("TS", "T-Shirt", "Clothing", Money::from_major(350), 1),
//!     CartItem::new("HAT", "Hat", "Accessories", Money::from_major(250), 1),
//! ];
//!
//! let result = calculate_final_price(
//!     &cart,
//!     &[
//!         Campaign::percent_coupon("c10", 10),
//!         Campaign::points_redeem("p50", 50, 20),
//!         Campaign::threshold_every_x_get_y("s300-40", Money::from_major(300), Money::from_major(40)),
//!     ],
//! );
//!
//! assert_eq!(result.subtotal, Money::from_major(600));
//! assert_eq!(result.final_total, Money::from_major(450));
//! ```

pub mod campaign;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pipeline;

// Re-exports for convenience
pub use campaign::{
    ApplyContext, ApplyResult, Campaign, CampaignKind, CampaignRule, DiscountLine,
    DEFAULT_POINTS_CAP_PERCENT,
};
pub use cart::{category_total, CartItem};
pub use catalog::{CampaignCatalog, CampaignSpec};
pub use error::{PricingError, PricingResult};
pub use money::{round2, subtotal_of, Money};
pub use pipeline::{calculate_final_price, pick_best, CalcResult, Selection};
