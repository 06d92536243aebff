//! The order pricing engine.
//!
//! Pure: the result is recomputed in full from the cart and the resolved
//! driving distance on every call, never updated incrementally.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::cart::Cart;

/// Fee constants and tier thresholds.
///
/// `Default` carries the storefront's production values; the delivery fee
/// cap is unset unless configured.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Picking fee charged per unit in the cart.
    pub picking_fee_per_unit: Decimal,
    /// Picking fee charged per kilogram-equivalent.
    pub picking_fee_per_kg: Decimal,
    /// Delivery rate per kilometer for ordinary orders.
    pub standard_rate_per_km: Decimal,
    /// Delivery rate per kilometer once either tier threshold is exceeded.
    pub elevated_rate_per_km: Decimal,
    /// Total quantity above which (strictly) the elevated rate applies.
    pub quantity_threshold: u32,
    /// Total weight in kg above which (strictly) the elevated rate applies.
    pub weight_threshold_kg: f64,
    /// Optional ceiling on the delivery fee.
    pub delivery_fee_cap: Option<Decimal>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            picking_fee_per_unit: Decimal::new(25, 2),
            picking_fee_per_kg: Decimal::new(25, 2),
            standard_rate_per_km: Decimal::TWO,
            elevated_rate_per_km: Decimal::new(4, 0),
            quantity_threshold: 100,
            weight_threshold_kg: 30.0,
            delivery_fee_cap: None,
        }
    }
}

/// A fully priced cart. Amounts are full precision; round to 2 decimal
/// places only when presenting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    pub subtotal: Decimal,
    pub picking_fee: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub total_weight_kg: f64,
    pub total_quantity: u32,
}

/// Cart invariants the engine refuses to price past.
///
/// The cart mutation contract already prevents these from arising; the
/// engine still checks so a violated invariant fails loudly instead of
/// producing a wrong price.
#[derive(Debug, Error)]
pub enum InvalidCartError {
    #[error("cart line '{item_id}' has zero quantity")]
    ZeroQuantity { item_id: String },

    #[error("cart line '{item_id}' has a negative unit price")]
    NegativeUnitPrice { item_id: String },

    #[error("cart line '{item_id}' has discount {discount_percent}% outside 0..=100")]
    DiscountOutOfRange {
        item_id: String,
        discount_percent: u8,
    },

    #[error("cart line '{item_id}' has a non-finite or negative weight")]
    InvalidWeight { item_id: String },

    #[error("distance {0} km is not a finite non-negative number")]
    InvalidDistance(f64),
}

/// Price `cart` for a delivery over `distance_km`.
///
/// `distance_km` is `None` when no routing result is available; the
/// delivery fee is then 0 (a missing lookup lowers the price, never
/// aborts the checkout).
///
/// # Errors
///
/// Returns [`InvalidCartError`] when a cart line violates the mutation
/// contract (zero quantity, discount above 100, negative price or
/// weight) or when `distance_km` is not a finite non-negative number.
pub fn price(
    cart: &Cart,
    distance_km: Option<f64>,
    config: &PricingConfig,
) -> Result<PricingResult, InvalidCartError> {
    validate(cart, distance_km)?;

    let mut subtotal = Decimal::ZERO;
    let mut picking_fee = Decimal::ZERO;
    let mut total_weight_kg = 0.0_f64;
    let mut total_quantity = 0_u32;

    for line in cart.lines() {
        let quantity = Decimal::from(line.quantity);
        let line_weight_kg = line.item.unit_weight_kg() * f64::from(line.quantity);

        subtotal += line.item.effective_unit_price() * quantity;
        picking_fee += quantity * config.picking_fee_per_unit
            + decimal_from_weight(&line.item.id, line_weight_kg)? * config.picking_fee_per_kg;
        total_weight_kg += line_weight_kg;
        total_quantity += line.quantity;
    }

    let rate = if total_quantity > config.quantity_threshold
        || total_weight_kg > config.weight_threshold_kg
    {
        config.elevated_rate_per_km
    } else {
        config.standard_rate_per_km
    };

    let mut delivery_fee = match distance_km {
        Some(km) => {
            Decimal::from_f64_retain(km).ok_or(InvalidCartError::InvalidDistance(km))? * rate
        }
        None => Decimal::ZERO,
    };
    if let Some(cap) = config.delivery_fee_cap {
        delivery_fee = delivery_fee.min(cap);
    }

    Ok(PricingResult {
        subtotal,
        picking_fee,
        delivery_fee,
        total: subtotal + picking_fee + delivery_fee,
        total_weight_kg,
        total_quantity,
    })
}

fn validate(cart: &Cart, distance_km: Option<f64>) -> Result<(), InvalidCartError> {
    for line in cart.lines() {
        if line.quantity == 0 {
            return Err(InvalidCartError::ZeroQuantity {
                item_id: line.item.id.clone(),
            });
        }
        if line.item.unit_price.is_sign_negative() && !line.item.unit_price.is_zero() {
            return Err(InvalidCartError::NegativeUnitPrice {
                item_id: line.item.id.clone(),
            });
        }
        if line.item.discount_percent > 100 {
            return Err(InvalidCartError::DiscountOutOfRange {
                item_id: line.item.id.clone(),
                discount_percent: line.item.discount_percent,
            });
        }
        if !(line.item.unit_weight.is_finite() && line.item.unit_weight >= 0.0) {
            return Err(InvalidCartError::InvalidWeight {
                item_id: line.item.id.clone(),
            });
        }
    }
    if let Some(km) = distance_km {
        if !(km.is_finite() && km >= 0.0) {
            return Err(InvalidCartError::InvalidDistance(km));
        }
    }
    Ok(())
}

fn decimal_from_weight(item_id: &str, kg: f64) -> Result<Decimal, InvalidCartError> {
    Decimal::from_f64_retain(kg).ok_or_else(|| InvalidCartError::InvalidWeight {
        item_id: item_id.to_string(),
    })
}
