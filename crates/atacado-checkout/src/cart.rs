//! Cart model and mutations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit the catalog declares an item's weight in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Gram,
    Kilogram,
    /// Liters are treated as numerically equal to kilograms for fee
    /// purposes — an intentional approximation carried from the existing
    /// storefront, pending product clarification.
    Liter,
}

/// A catalog item a customer can put in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    /// Percentage off `unit_price`, `0..=100`. `0` means no discount.
    pub discount_percent: u8,
    pub unit_weight: f64,
    pub weight_unit: WeightUnit,
}

impl Item {
    /// Unit price after the item's discount, full precision.
    #[must_use]
    pub fn effective_unit_price(&self) -> Decimal {
        if self.discount_percent == 0 {
            return self.unit_price;
        }
        let remaining = Decimal::from(100u32.saturating_sub(u32::from(self.discount_percent)));
        self.unit_price * remaining / Decimal::ONE_HUNDRED
    }

    /// Weight of one unit in kilogram-equivalents.
    #[must_use]
    pub fn unit_weight_kg(&self) -> f64 {
        match self.weight_unit {
            WeightUnit::Gram => self.unit_weight / 1000.0,
            WeightUnit::Kilogram | WeightUnit::Liter => self.unit_weight,
        }
    }
}

/// One cart entry. `quantity` is always at least 1; a line that would
/// reach 0 is removed from the cart instead of being retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item: Item,
    pub quantity: u32,
}

/// Ordered sequence of cart lines, keyed by item id (unique per cart).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add one unit of `item`: increments the existing line's quantity, or
    /// appends a new line at quantity 1.
    pub fn add(&mut self, item: &Item) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            });
        }
    }

    /// Set the quantity of the line for `item_id`. Quantity 0 removes the
    /// line; an unknown id is a no-op.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item_id) {
            line.quantity = quantity;
        }
    }

    /// Remove the line for `item_id`, if present.
    pub fn remove(&mut self, item_id: &str) {
        self.lines.retain(|line| line.item.id != item_id);
    }
}

/// Keep only items whose name contains `query`, case-insensitively, and
/// that pass the caller's category predicate.
///
/// Mirrors the in-store browse filter; an empty query matches everything.
#[must_use]
pub fn filter_items<'a>(
    items: &'a [Item],
    query: &str,
    mut matches_category: impl FnMut(&Item) -> bool,
) -> Vec<&'a Item> {
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches_category(item))
        .filter(|item| query.is_empty() || item.name.to_lowercase().contains(&query))
        .collect()
}
