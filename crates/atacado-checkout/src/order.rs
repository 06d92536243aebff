//! Order summary formatting and messaging hand-off.
//!
//! The message template is an external contract: store operators read
//! these texts in their messaging app, so the labels stay in Portuguese
//! exactly as the storefront has always sent them.

use std::fmt::Write as _;

use atacado_core::Store;
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rust_decimal::Decimal;

use crate::cart::Cart;
use crate::pricing::PricingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Pix,
    CreditCard,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Pix => write!(f, "Pix"),
            PaymentMethod::CreditCard => write!(f, "Cartão de Crédito"),
        }
    }
}

/// Checkout form data accompanying an order.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
    pub name: String,
    pub street_address: String,
    pub note: String,
    pub payment_method: PaymentMethod,
}

/// Render the human-readable order summary handed to the outbound
/// messaging channel. All amounts are rounded to 2 decimal places here,
/// at the presentation boundary.
#[must_use]
pub fn format_order_message(
    store: &Store,
    cart: &Cart,
    pricing: &PricingResult,
    customer: &CustomerDetails,
    placed_at: DateTime<Utc>,
) -> String {
    let mut message = String::new();

    let _ = writeln!(message, "Detalhes do pedido:");
    let _ = writeln!(message);
    let _ = writeln!(message, "Data: {}", placed_at.format("%d/%m/%Y %H:%M UTC"));
    let _ = writeln!(message, "Nome: {}", customer.name);
    let _ = writeln!(message, "Endereço: {}", customer.street_address);
    let _ = writeln!(message, "Observação: {}", customer.note);
    let _ = writeln!(message, "Método de Pagamento: {}", customer.payment_method);
    let _ = writeln!(message);
    let _ = writeln!(message, "Supermercado: {}", store.name);
    let _ = writeln!(message, "Endereço do Supermercado: {}", store.address);
    let _ = writeln!(message);
    let _ = writeln!(message, "Itens:");

    for line in cart.lines() {
        let line_total = line.item.effective_unit_price() * Decimal::from(line.quantity);
        let _ = writeln!(
            message,
            "- {} (x{}): R${}",
            line.item.name,
            line.quantity,
            money(line_total)
        );
        if let Some(description) = &line.item.description {
            let _ = writeln!(message, "  Descrição: {description}");
        }
    }

    let _ = writeln!(message);
    let _ = writeln!(message, "Total do carrinho: R${}", money(pricing.subtotal));
    let _ = writeln!(message, "Escolhendo Taxa: R${}", money(pricing.picking_fee));
    let _ = writeln!(message, "Entrega Taxa: R${}", money(pricing.delivery_fee));
    let _ = write!(message, "Total Geral: R${}", money(pricing.total));

    message
}

/// Prefilled `wa.me` link that opens the conversation with the order text.
#[must_use]
pub fn whatsapp_order_url(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{phone}?text={}",
        utf8_percent_encode(message, NON_ALPHANUMERIC)
    )
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
