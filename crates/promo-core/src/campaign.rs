//! # Campaigns
//!
//! Promotional campaigns and the rules that compute their discounts.
//!
//! A campaign belongs to exactly one category. The category decides which
//! pool the campaign competes in and when that pool runs; the rule decides
//! how much it takes off.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Coupon     FixedAmountCoupon, PercentCoupon                  │
//! │ OnTop      PercentOffCategory, PointsRedeem                  │
//! │ Seasonal   ThresholdEveryXGetY                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::{category_total, CartItem};
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cap applied to points redemption when none is configured
pub const DEFAULT_POINTS_CAP_PERCENT: u32 = 20;

fn default_cap_percent() -> Decimal {
    Decimal::from(DEFAULT_POINTS_CAP_PERCENT)
}

/// Campaign category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CampaignKind {
    /// Applied first, against the subtotal
    Coupon,
    /// Applied second, against the post-coupon total
    OnTop,
    /// Applied last, against the post-on-top total
    Seasonal,
}

impl CampaignKind {
    /// Order in which category pools are applied
    pub const ORDER: [CampaignKind; 3] =
        [CampaignKind::Coupon, CampaignKind::OnTop, CampaignKind::Seasonal];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignKind::Coupon => "coupon",
            CampaignKind::OnTop => "onTop",
            CampaignKind::Seasonal => "seasonal",
        }
    }
}

impl fmt::Display for CampaignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discount rule of a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CampaignRule {
    /// Flat amount off the running total
    FixedAmountCoupon { amount: Money },

    /// Percentage off the running total
    PercentCoupon { percent: Decimal },

    /// Percentage of the subtotal of one category's items
    PercentOffCategory { category: String, percent: Decimal },

    /// Loyalty points (one point per major unit), capped at a share of the total
    PointsRedeem {
        points: u64,
        #[serde(default = "default_cap_percent")]
        cap_percent: Decimal,
    },

    /// `minus_y` off for every full `every_x` of the running total.
    /// Both are cent-precision, so a sub-cent value rounds to zero and makes
    /// the campaign a no-op.
    ThresholdEveryXGetY { every_x: Money, minus_y: Money },
}

impl CampaignRule {
    pub fn kind(&self) -> CampaignKind {
        match self {
            CampaignRule::FixedAmountCoupon { .. } | CampaignRule::PercentCoupon { .. } => {
                CampaignKind::Coupon
            }
            CampaignRule::PercentOffCategory { .. } | CampaignRule::PointsRedeem { .. } => {
                CampaignKind::OnTop
            }
            CampaignRule::ThresholdEveryXGetY { .. } => CampaignKind::Seasonal,
        }
    }

    /// Label shown for the campaign itself
    fn default_label(&self) -> String {
        match self {
            CampaignRule::FixedAmountCoupon { amount } => format!("Coupon THB {} off", amount),
            CampaignRule::PercentCoupon { percent } => {
                format!("Coupon {}% off", percent.normalize())
            }
            CampaignRule::PercentOffCategory { category, percent } => {
                format!("{}% off {}", percent.normalize(), category)
            }
            CampaignRule::PointsRedeem {
                points,
                cap_percent,
            } => format!("Redeem {} pts (cap {}%)", points, cap_percent.normalize()),
            CampaignRule::ThresholdEveryXGetY { every_x, minus_y } => {
                format!("Every {} get {} off", every_x, minus_y)
            }
        }
    }

    /// Label written on the discount line when the campaign wins
    fn default_line_label(&self) -> String {
        match self {
            CampaignRule::FixedAmountCoupon { .. } => "Fixed amount coupon".to_string(),
            CampaignRule::PercentCoupon { .. } => "Percentage coupon".to_string(),
            CampaignRule::PercentOffCategory { category, percent } => {
                format!("Category {} {}%", category, percent.normalize())
            }
            CampaignRule::PointsRedeem { .. } => "Points redeem".to_string(),
            CampaignRule::ThresholdEveryXGetY { .. } => "Seasonal threshold".to_string(),
        }
    }

    /// Discount and resulting total, or `None` when the rule cannot apply at all.
    ///
    /// Each rule bounds its own result: a fixed coupon and points never take
    /// more than the running total, while percentage and threshold rules keep
    /// their full discount and only floor the resulting total at zero.
    fn evaluate(&self, ctx: &ApplyContext<'_>) -> Option<(Money, Money)> {
        let running = ctx.running_total;
        match self {
            CampaignRule::FixedAmountCoupon { amount } => {
                let discount = non_negative((*amount).min(running));
                Some((discount, running - discount))
            }
            CampaignRule::PercentCoupon { percent } => {
                let discount = non_negative(running.percent_of(*percent));
                Some((discount, floor_total(running, discount)))
            }
            CampaignRule::PercentOffCategory { category, percent } => {
                let base = category_total(ctx.items, category);
                let discount = non_negative(base.percent_of(*percent));
                Some((discount, floor_total(running, discount)))
            }
            CampaignRule::PointsRedeem {
                points,
                cap_percent,
            } => {
                let points = Money::from_major(i64::try_from(*points).unwrap_or(i64::MAX));
                let cap = running.percent_of(*cap_percent);
                let discount = non_negative(points.min(cap).min(running));
                Some((discount, running - discount))
            }
            CampaignRule::ThresholdEveryXGetY { every_x, minus_y } => {
                if !every_x.is_positive() || !minus_y.is_positive() {
                    return None;
                }
                let buckets = running.cents().div_euclid(every_x.cents());
                let discount = non_negative(*minus_y * buckets);
                Some((discount, floor_total(running, discount)))
            }
        }
    }
}

fn non_negative(discount: Money) -> Money {
    discount.max(Money::ZERO)
}

/// `running - discount` floored at zero, never above `running`.
fn floor_total(running: Money, discount: Money) -> Money {
    (running - discount).max(Money::ZERO.min(running))
}

/// What a campaign sees when it is evaluated
#[derive(Debug, Clone, Copy)]
pub struct ApplyContext<'a> {
    /// The whole cart
    pub items: &'a [CartItem],
    /// Total after all previously applied categories
    pub running_total: Money,
}

impl<'a> ApplyContext<'a> {
    pub fn new(items: &'a [CartItem], running_total: Money) -> Self {
        Self {
            items,
            running_total,
        }
    }
}

/// Audit record of one applied discount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountLine {
    pub id: String,
    pub kind: CampaignKind,
    pub label: String,
    /// Always non-negative
    pub amount: Money,
}

/// Outcome of evaluating one campaign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_total: Money,
    pub line: Option<DiscountLine>,
}

impl ApplyResult {
    /// Total untouched, no line
    pub fn unchanged(total: Money) -> Self {
        Self {
            new_total: total,
            line: None,
        }
    }

    /// Discount carried by the line, zero when there is none
    pub fn discount(&self) -> Money {
        self.line.as_ref().map(|l| l.amount).unwrap_or(Money::ZERO)
    }
}

/// A named discount rule
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    id: String,
    label: String,
    line_label: String,
    rule: CampaignRule,
}

impl Campaign {
    /// Create a campaign from any rule, with generated labels
    pub fn new(id: impl Into<String>, rule: CampaignRule) -> Self {
        Self {
            id: id.into(),
            label: rule.default_label(),
            line_label: rule.default_line_label(),
            rule,
        }
    }

    /// Coupon: flat amount off
    pub fn fixed_amount_coupon(id: impl Into<String>, amount: Money) -> Self {
        Self::new(id, CampaignRule::FixedAmountCoupon { amount })
    }

    /// Coupon: percentage of the running total
    pub fn percent_coupon(id: impl Into<String>, percent: impl Into<Decimal>) -> Self {
        Self::new(
            id,
            CampaignRule::PercentCoupon {
                percent: percent.into(),
            },
        )
    }

    /// On top: percentage of one category's subtotal
    pub fn percent_off_category(
        id: impl Into<String>,
        category: impl Into<String>,
        percent: impl Into<Decimal>,
    ) -> Self {
        Self::new(
            id,
            CampaignRule::PercentOffCategory {
                category: category.into(),
                percent: percent.into(),
            },
        )
    }

    /// On top: redeem points, capped at `cap_percent` of the running total
    pub fn points_redeem(
        id: impl Into<String>,
        points: u64,
        cap_percent: impl Into<Decimal>,
    ) -> Self {
        Self::new(
            id,
            CampaignRule::PointsRedeem {
                points,
                cap_percent: cap_percent.into(),
            },
        )
    }

    /// Seasonal: `minus_y` off for every full `every_x`
    pub fn threshold_every_x_get_y(id: impl Into<String>, every_x: Money, minus_y: Money) -> Self {
        Self::new(id, CampaignRule::ThresholdEveryXGetY { every_x, minus_y })
    }

    /// Builder: replace both generated labels
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.line_label = label.clone();
        self.label = label;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> CampaignKind {
        self.rule.kind()
    }

    /// Evaluate against a context. Never raises the total or drops it below zero.
    pub fn apply(&self, ctx: &ApplyContext<'_>) -> ApplyResult {
        let Some((amount, new_total)) = self.rule.evaluate(ctx) else {
            return ApplyResult::unchanged(ctx.running_total);
        };

        ApplyResult {
            new_total,
            line: Some(DiscountLine {
                id: self.id.clone(),
                kind: self.kind(),
                label: self.line_label.clone(),
                amount,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn major(amount: i64) -> Money {
        Money::from_major(amount)
    }

    fn cart_b() -> Vec<CartItem> {
        vec![
            CartItem::new("TS", "T-Shirt", "Clothing", major(350), 1),
            CartItem::new("HOOD", "Hoodie", "Clothing", major(700), 1),
            CartItem::new("WATCH", "Watch", "Electronics", major(850), 1),
            CartItem::new("BAG", "Bag", "Accessories", major(640), 1),
        ]
    }

    #[test]
    fn test_kinds_follow_rules() {
        assert_eq!(Campaign::fixed_amount_coupon("a", major(1)).kind(), CampaignKind::Coupon);
        assert_eq!(Campaign::percent_coupon("b", 5).kind(), CampaignKind::Coupon);
        assert_eq!(
            Campaign::percent_off_category("c", "Clothing", 5).kind(),
            CampaignKind::OnTop
        );
        assert_eq!(Campaign::points_redeem("d", 10, 20).kind(), CampaignKind::OnTop);
        assert_eq!(
            Campaign::threshold_every_x_get_y("e", major(300), major(40)).kind(),
            CampaignKind::Seasonal
        );
    }

    #[test]
    fn test_default_labels() {
        let fixed = Campaign::fixed_amount_coupon("c1", major(50));
        assert_eq!(fixed.label(), "Coupon THB 50 off");

        let points = Campaign::points_redeem("p1", 68, 20);
        assert_eq!(points.label(), "Redeem 68 pts (cap 20%)");

        let seasonal = Campaign::threshold_every_x_get_y("s1", major(300), major(40));
        assert_eq!(seasonal.label(), "Every 300 get 40 off");

        let category = Campaign::percent_off_category("cat15", "Clothing", 15);
        assert_eq!(category.label(), "15% off Clothing");

        let ctx = ApplyContext::new(&[], major(600));
        let line = fixed.apply(&ctx).line.unwrap();
        assert_eq!(line.label, "Fixed amount coupon");
    }

    #[test]
    fn test_with_label_overrides_line_label() {
        let campaign = Campaign::percent_coupon("c2", 10).with_label("Welcome back");
        let result = campaign.apply(&ApplyContext::new(&[], major(600)));

        assert_eq!(campaign.label(), "Welcome back");
        assert_eq!(result.line.unwrap().label, "Welcome back");
    }

    #[test]
    fn test_fixed_amount_clamped_to_total() {
        let campaign = Campaign::fixed_amount_coupon("big", major(99_999));
        let result = campaign.apply(&ApplyContext::new(&[], major(600)));

        assert_eq!(result.discount(), major(600));
        assert_eq!(result.new_total, Money::ZERO);
    }

    #[test]
    fn test_negative_fixed_amount_is_zero_discount() {
        let campaign = Campaign::fixed_amount_coupon("neg", major(-10));
        let result = campaign.apply(&ApplyContext::new(&[], major(600)));

        assert_eq!(result.discount(), Money::ZERO);
        assert_eq!(result.new_total, major(600));
    }

    #[test]
    fn test_percent_coupon() {
        let campaign = Campaign::percent_coupon("c10", 10);
        let result = campaign.apply(&ApplyContext::new(&[], major(830)));

        assert_eq!(result.discount(), major(83));
        assert_eq!(result.new_total, major(747));
    }

    #[test]
    fn test_percent_off_category_ignores_running_total() {
        let items = cart_b();
        let campaign = Campaign::percent_off_category("cat15", "Clothing", 15);

        let result = campaign.apply(&ApplyContext::new(&items, major(2540)));
        assert_eq!(result.discount(), Money::from_major_f64(157.5));
        assert_eq!(result.new_total, Money::from_major_f64(2382.5));

        // Same base even when an earlier stage already lowered the total
        let result = campaign.apply(&ApplyContext::new(&items, major(2000)));
        assert_eq!(result.discount(), Money::from_major_f64(157.5));
    }

    #[test]
    fn test_percent_off_category_floors_total_at_zero() {
        let items = cart_b();
        let campaign = Campaign::percent_off_category("cat100", "Clothing", 100);
        let result = campaign.apply(&ApplyContext::new(&items, major(500)));

        // Full category discount is reported; only the total stops at zero
        assert_eq!(result.new_total, Money::ZERO);
        assert_eq!(result.discount(), major(1050));
    }

    #[test]
    fn test_percent_coupon_over_hundred_floors_total() {
        let campaign = Campaign::percent_coupon("c150", 150);
        let result = campaign.apply(&ApplyContext::new(&[], major(200)));

        assert_eq!(result.discount(), major(300));
        assert_eq!(result.new_total, Money::ZERO);
    }

    #[test]
    fn test_percent_off_missing_category() {
        let items = cart_b();
        let campaign = Campaign::percent_off_category("toys", "Toys", 50);
        let result = campaign.apply(&ApplyContext::new(&items, major(2540)));

        assert_eq!(result.discount(), Money::ZERO);
    }

    #[test]
    fn test_points_capped() {
        // 20% of 540 = 108, so 500 points only take 108 off
        let campaign = Campaign::points_redeem("pts", 500, 20);
        let result = campaign.apply(&ApplyContext::new(&[], major(540)));
        assert_eq!(result.discount(), major(108));

        let campaign = Campaign::points_redeem("pts", 68, 20);
        let result = campaign.apply(&ApplyContext::new(&[], major(830)));
        assert_eq!(result.discount(), major(68));
        assert_eq!(result.new_total, major(762));
    }

    #[test]
    fn test_threshold_buckets() {
        let campaign = Campaign::threshold_every_x_get_y("s1", major(300), major(40));

        let result = campaign.apply(&ApplyContext::new(&[], major(830)));
        assert_eq!(result.discount(), major(80));
        assert_eq!(result.new_total, major(750));

        let result = campaign.apply(&ApplyContext::new(&[], major(299)));
        assert_eq!(result.discount(), Money::ZERO);
        assert!(result.line.is_some());
    }

    #[test]
    fn test_threshold_non_positive_params_are_noop() {
        for campaign in [
            Campaign::threshold_every_x_get_y("bad1", Money::ZERO, major(40)),
            Campaign::threshold_every_x_get_y("bad2", major(300), Money::ZERO),
            Campaign::threshold_every_x_get_y("bad3", major(-300), major(40)),
            Campaign::threshold_every_x_get_y("bad4", major(300), major(-40)),
            Campaign::threshold_every_x_get_y("bad5", major(-300), major(-40)),
        ] {
            let result = campaign.apply(&ApplyContext::new(&[], major(600)));
            assert_eq!(result, ApplyResult::unchanged(major(600)));
        }
    }

    #[test]
    fn test_threshold_floors_total_at_zero() {
        // minus_y larger than every_x
        let campaign = Campaign::threshold_every_x_get_y("s", major(100), major(150));
        let result = campaign.apply(&ApplyContext::new(&[], major(250)));

        assert_eq!(result.discount(), major(300));
        assert_eq!(result.new_total, Money::ZERO);
    }

    #[test]
    fn test_sub_cent_threshold_rounds_to_noop() {
        // Thresholds are cent-precision; 0.004 rounds to zero
        let every_x = Money::from_major_f64(0.004);
        assert_eq!(every_x, Money::ZERO);

        let campaign = Campaign::threshold_every_x_get_y("tiny", every_x, major(1));
        let result = campaign.apply(&ApplyContext::new(&[], major(600)));
        assert_eq!(result, ApplyResult::unchanged(major(600)));

        // 0.005 rounds up to one cent and still counts buckets
        let campaign = Campaign::threshold_every_x_get_y(
            "cent",
            Money::from_major_f64(0.005),
            Money::from_cents(1),
        );
        let result = campaign.apply(&ApplyContext::new(&[], Money::from_cents(250)));
        assert_eq!(result.discount(), Money::from_cents(250));
    }

    #[test]
    fn test_rule_serde_tagging() {
        let rule: CampaignRule = serde_json::from_str(
            r#"{"type":"threshold_every_x_get_y","every_x":300,"minus_y":40}"#,
        )
        .unwrap();
        assert_eq!(
            rule,
            CampaignRule::ThresholdEveryXGetY {
                every_x: major(300),
                minus_y: major(40)
            }
        );

        let rule: CampaignRule =
            serde_json::from_str(r#"{"type":"points_redeem","points":60}"#).unwrap();
        assert_eq!(
            rule,
            CampaignRule::PointsRedeem {
                points: 60,
                cap_percent: Decimal::from(20)
            }
        );
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(serde_json::to_string(&CampaignKind::OnTop).unwrap(), "\"onTop\"");
        assert_eq!(CampaignKind::Seasonal.to_string(), "seasonal");
    }
}
