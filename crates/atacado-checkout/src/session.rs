//! Per-customer checkout session.
//!
//! Owns the mutable state the storefront previously scattered across
//! ambient context: the cart, the selected store, and the customer's
//! resolved location. Everything is passed explicitly into the pure
//! pricing and filtering functions; nothing is shared across sessions.

use atacado_core::{GeoPoint, Store};
use atacado_geo::{Geocoder, Router};

use crate::cart::{Cart, Item};
use crate::pricing::{price, InvalidCartError, PricingConfig, PricingResult};

/// A single customer's in-progress order against one store.
///
/// Created empty at session start and discarded when checkout completes;
/// there is no persistence behind it.
#[derive(Debug)]
pub struct CheckoutSession {
    store: Store,
    cart: Cart,
    customer_location: Option<GeoPoint>,
    customer_address: Option<String>,
}

impl CheckoutSession {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self::with_cart(store, Cart::new())
    }

    /// Resume a session around an already-built cart.
    #[must_use]
    pub fn with_cart(store: Store, cart: Cart) -> Self {
        Self {
            store,
            cart,
            customer_location: None,
            customer_address: None,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add_item(&mut self, item: &Item) {
        self.cart.add(item);
    }

    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) {
        self.cart.set_quantity(item_id, quantity);
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.cart.remove(item_id);
    }

    pub fn set_customer_location(&mut self, location: GeoPoint) {
        self.customer_location = Some(location);
    }

    #[must_use]
    pub fn customer_address(&self) -> Option<&str> {
        self.customer_address.as_deref()
    }

    /// Record the customer's street address and resolve it to coordinates.
    ///
    /// # Errors
    ///
    /// Propagates the geocoder's failure; the address is recorded either
    /// way so the caller can retry resolution later.
    pub async fn set_customer_address(
        &mut self,
        address: &str,
        geocoder: &dyn Geocoder,
    ) -> Result<GeoPoint, atacado_geo::GeocodingError> {
        self.customer_address = Some(address.to_string());
        let location = geocoder.geocode(address).await?;
        self.customer_location = Some(location);
        Ok(location)
    }

    /// Resolve the store's own coordinates once per session.
    ///
    /// # Errors
    ///
    /// Propagates the geocoder's failure when the store has no cached
    /// coordinates yet.
    pub async fn resolve_store_coordinates(
        &mut self,
        geocoder: &dyn Geocoder,
    ) -> Result<GeoPoint, atacado_geo::GeocodingError> {
        if let Some(coordinates) = self.store.coordinates {
            return Ok(coordinates);
        }
        let coordinates = geocoder.geocode(&self.store.address).await?;
        self.store.coordinates = Some(coordinates);
        Ok(coordinates)
    }

    /// Driving distance from the store to the customer, if resolvable.
    ///
    /// Returns `None` when either endpoint is unresolved or the routing
    /// lookup fails; a missing distance is priced as free delivery rather
    /// than failing the checkout.
    pub async fn driving_distance_km(&self, router: &dyn Router) -> Option<f64> {
        let origin = self.store.coordinates?;
        let destination = self.customer_location?;

        match router.driving_distance_km(origin, destination).await {
            Ok(km) => Some(km),
            Err(e) => {
                tracing::warn!(
                    store_id = %self.store.id,
                    error = %e,
                    "driving distance lookup failed; pricing without delivery fee"
                );
                None
            }
        }
    }

    /// Price the session's cart, resolving the delivery distance through
    /// `router` first.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCartError`] if the cart violates the mutation
    /// contract.
    pub async fn checkout(
        &self,
        router: &dyn Router,
        config: &PricingConfig,
    ) -> Result<PricingResult, InvalidCartError> {
        let distance_km = self.driving_distance_km(router).await;
        price(&self.cart, distance_km, config)
    }
}
