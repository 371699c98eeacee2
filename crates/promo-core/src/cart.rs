//! # Cart Types
//!
//! The items a pricing request is evaluated against.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line in the shopping cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Stock keeping unit
    pub sku: String,

    /// Display name
    pub name: String,

    /// Open category string (e.g. "Clothing")
    pub category: String,

    /// Price of one unit
    pub unit_price: Money,

    /// Quantity
    #[serde(alias = "qty", default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl CartItem {
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            category: category.into(),
            unit_price,
            quantity,
        }
    }

    /// `unit_price × quantity`
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category == category
    }
}

/// Total of all items whose category matches exactly.
pub fn category_total(items: &[CartItem], category: &str) -> Money {
    items
        .iter()
        .filter(|item| item.in_category(category))
        .map(CartItem::line_total)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = CartItem::new("TS", "T-Shirt", "Clothing", Money::from_major(350), 3);
        assert_eq!(item.line_total(), Money::from_major(1050));
    }

    #[test]
    fn test_category_total_is_exact_match() {
        let items = vec![
            CartItem::new("TS", "T-Shirt", "Clothing", Money::from_major(350), 1),
            CartItem::new("HOOD", "Hoodie", "Clothing", Money::from_major(700), 1),
            CartItem::new("BAG", "Bag", "Accessories", Money::from_major(640), 1),
        ];

        assert_eq!(category_total(&items, "Clothing"), Money::from_major(1050));
        assert_eq!(category_total(&items, "clothing"), Money::ZERO);
        assert_eq!(category_total(&[], "Clothing"), Money::ZERO);
    }

    #[test]
    fn test_deserialize_accepts_qty_alias() {
        let item: CartItem = serde_json::from_str(
            r#"{"sku":"HAT","name":"Hat","category":"Accessories","unit_price":250,"qty":2}"#,
        )
        .unwrap();

        assert_eq!(item.quantity, 2);
        assert_eq!(item.line_total(), Money::from_major(500));
    }
}
