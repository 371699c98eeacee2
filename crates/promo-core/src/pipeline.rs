//! # Pricing Pipeline
//!
//! Applies at most one campaign per category, in the fixed order
//! coupon → on top → seasonal, against a running total.
//!
//! ```text
//! subtotal ──► [best coupon] ──► [best on-top] ──► [best seasonal] ──► final total
//!                   │                  │                  │
//!                   └──────────────────┴──────────────────┴──► discount lines
//! ```
//!
//! Every pool is evaluated against the total left by the previous one, so
//! a points cap sees the post-coupon total and a seasonal threshold sees the
//! post-on-top total.

use crate::campaign::{ApplyContext, ApplyResult, Campaign, CampaignKind, DiscountLine};
use crate::cart::CartItem;
use crate::money::{subtotal_of, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of pricing a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcResult {
    /// Total before any discount
    pub subtotal: Money,
    /// Total after all winning discounts
    pub final_total: Money,
    /// Winning discounts in application order (at most one per category)
    pub lines: Vec<DiscountLine>,
}

impl CalcResult {
    /// Sum of all applied discounts
    pub fn total_discount(&self) -> Money {
        self.lines.iter().map(|l| l.amount).sum()
    }

    /// Line emitted for a category, if any
    pub fn line_for(&self, kind: CampaignKind) -> Option<&DiscountLine> {
        self.lines.iter().find(|l| l.kind == kind)
    }
}

/// The winning campaign of a pool together with its evaluation
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub campaign: &'a Campaign,
    pub result: ApplyResult,
    pub discount: Money,
}

/// Evaluate every campaign against the same context and keep the largest
/// discount. Ties go to the first campaign encountered; a pool where nothing
/// yields a positive discount has no winner.
pub fn pick_best<'a, I>(pool: I, ctx: &ApplyContext<'_>) -> Option<Selection<'a>>
where
    I: IntoIterator<Item = &'a Campaign>,
{
    let mut best: Option<Selection<'a>> = None;

    for campaign in pool {
        let result = campaign.apply(ctx);
        let discount = result.discount();
        let best_discount = best.as_ref().map(|b| b.discount).unwrap_or(Money::ZERO);

        if discount > best_discount {
            best = Some(Selection {
                campaign,
                result,
                discount,
            });
        }
    }

    best
}

/// Price a cart.
///
/// Campaigns are partitioned by category; within a category the supplied
/// order decides ties. Inputs are only read, so concurrent calls need no
/// coordination.
pub fn calculate_final_price(items: &[CartItem], campaigns: &[Campaign]) -> CalcResult {
    let subtotal = subtotal_of(items);
    let mut running = subtotal;
    let mut lines = Vec::with_capacity(CampaignKind::ORDER.len());

    for kind in CampaignKind::ORDER {
        let pool = campaigns.iter().filter(|c| c.kind() == kind);
        let ctx = ApplyContext::new(items, running);

        match pick_best(pool, &ctx) {
            Some(Selection {
                campaign,
                result:
                    ApplyResult {
                        new_total,
                        line: Some(line),
                    },
                discount,
            }) if discount.is_positive() => {
                debug!(
                    category = %kind,
                    campaign = campaign.id(),
                    discount = %discount,
                    total = %new_total,
                    "Applied campaign"
                );
                running = new_total;
                lines.push(line);
            }
            _ => debug!(category = %kind, total = %running, "No campaign applied"),
        }
    }

    debug!(
        subtotal = %subtotal,
        final_total = %running,
        lines = lines.len(),
        "Priced cart"
    );

    CalcResult {
        subtotal,
        final_total: running,
        lines,
    }
}
