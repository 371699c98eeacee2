//! # Demo Scenario
//!
//! A cart plus campaigns to price from the console, and the plain-text
//! receipt the demo runner prints.

use promo_core::{
    calculate_final_price, CalcResult, Campaign, CampaignSpec, CartItem, Money, PricingError,
    PricingResult,
};
use serde::Deserialize;

/// Cart and campaigns loaded from a scenario file
#[derive(Debug, Clone, Deserialize)]
pub struct DemoScenario {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub campaigns: Vec<CampaignSpec>,
}

impl DemoScenario {
    /// T-Shirt and Hat with a coupon, points and a seasonal threshold
    pub fn reference() -> (Vec<CartItem>, Vec<Campaign>) {
        let items = vec![
            CartItem::new("TS", "T-Shirt", "Clothing", Money::from_major(350), 1),
            CartItem::new("HAT", "Hat", "Accessories", Money::from_major(250), 1),
        ];
        let campaigns = vec![
            Campaign::percent_coupon("c10", 10),
            Campaign::points_redeem("p60", 60, 20),
            Campaign::threshold_every_x_get_y("s300-40", Money::from_major(300), Money::from_major(40)),
        ];
        (items, campaigns)
    }

    /// Parse a scenario from TOML
    pub fn from_toml(toml_str: &str) -> PricingResult<Self> {
        toml::from_str(toml_str).map_err(|e| PricingError::Serialization(e.to_string()))
    }

    pub fn into_parts(self) -> (Vec<CartItem>, Vec<Campaign>) {
        let campaigns = self.campaigns.into_iter().map(Campaign::from).collect();
        (self.items, campaigns)
    }

    /// Price a scenario
    pub fn run(items: &[CartItem], campaigns: &[Campaign]) -> CalcResult {
        calculate_final_price(items, campaigns)
    }
}

/// Render subtotal, discount lines and final total
pub fn render_receipt(result: &CalcResult) -> String {
    let mut out = format!("Subtotal: {}\n", result.subtotal.display());

    if result.lines.is_empty() {
        out.push_str("Lines: (none)\n");
    } else {
        out.push_str("Lines:\n");
        for line in &result.lines {
            out.push_str(&format!(
                "  [{}] {} ({}): -{}\n",
                line.kind,
                line.label,
                line.id,
                line.amount.display()
            ));
        }
    }

    out.push_str(&format!("Final total: {}\n", result.final_total.display()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        // 600 -> 10% -> 540 -> 60 points (cap 108) -> 480 -> 1 bucket -> 440
        let (items, campaigns) = DemoScenario::reference();
        let result = DemoScenario::run(&items, &campaigns);

        assert_eq!(result.subtotal, Money::from_major(600));
        assert_eq!(result.final_total, Money::from_major(440));
        assert_eq!(result.lines.len(), 3);
    }

    #[test]
    fn test_render_receipt() {
        let (items, campaigns) = DemoScenario::reference();
        let receipt = render_receipt(&DemoScenario::run(&items, &campaigns));

        assert_eq!(
            receipt,
            "Subtotal: 600.00\n\
             Lines:\n  \
             [coupon] Percentage coupon (c10): -60.00\n  \
             [onTop] Points redeem (p60): -60.00\n  \
             [seasonal] Seasonal threshold (s300-40): -40.00\n\
             Final total: 440.00\n"
        );
    }

    #[test]
    fn test_render_without_lines() {
        let result = DemoScenario::run(&[], &[]);
        assert!(render_receipt(&result).contains("Lines: (none)"));
    }

    #[test]
    fn test_scenario_from_toml() {
        let scenario = DemoScenario::from_toml(
            r#"
[[items]]
sku = "TS"
name = "T-Shirt"
category = "Clothing"
unit_price = 350
qty = 2

[[campaigns]]
id = "cat15"
type = "percent_off_category"
category = "Clothing"
percent = 15
"#,
        )
        .unwrap();

        let (items, campaigns) = scenario.into_parts();
        let result = DemoScenario::run(&items, &campaigns);

        assert_eq!(result.subtotal, Money::from_major(700));
        assert_eq!(result.final_total, Money::from_major(595));
    }

    #[test]
    fn test_malformed_scenario_is_serialization_error() {
        let err = DemoScenario::from_toml("[[items]]\nsku = \"TS\"\n").unwrap_err();

        assert!(matches!(err, PricingError::Serialization(_)));
        assert_eq!(err.status_code(), 400);
    }
}
