//! Cart, order pricing, and checkout hand-off.
//!
//! The pricing engine is a pure function over the cart and an optional
//! driving distance; the [`CheckoutSession`] owns the mutable pieces
//! (cart, store selection, customer location) and feeds them into it.

mod address_cache;
mod cart;
mod order;
mod pricing;
mod session;

pub use address_cache::{AddressCache, AddressCacheError, InMemoryAddressCache, JsonFileAddressCache};
pub use cart::{filter_items, Cart, CartLine, Item, WeightUnit};
pub use order::{format_order_message, whatsapp_order_url, CustomerDetails, PaymentMethod};
pub use pricing::{price, InvalidCartError, PricingConfig, PricingResult};
pub use session::CheckoutSession;
