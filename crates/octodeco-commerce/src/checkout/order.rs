//! Order placement.
//!
//! There is no payment step and nothing is sent anywhere: placing an order
//! validates the form, snapshots the cart into a confirmation and empties the
//! cart.

use crate::cart::{CartStore, CartSummary};
use crate::checkout::{CheckoutForm, ShippingDetails};
use crate::error::CommerceError;
use crate::ids::OrderId;
use chrono::{DateTime, Utc};
use octodeco_cache::KvStore;
use serde::{Deserialize, Serialize};
use tracing::info;

/// What the customer sees after placing an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Generated order number.
    pub order_id: OrderId,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Recipient and address.
    pub ship_to: ShippingDetails,
    /// Cart contents and totals at the time of the order.
    pub summary: CartSummary,
}

impl OrderConfirmation {
    /// Whether the order ships free.
    pub fn free_shipping(&self) -> bool {
        self.summary.totals.qualifies_for_free_shipping
    }
}

/// Place an order for everything in `cart`.
///
/// The cart is cleared only when the order is placed; on error it is left
/// as it was.
pub fn place_order<S: KvStore>(
    cart: &mut CartStore<S>,
    form: &CheckoutForm,
) -> Result<OrderConfirmation, CommerceError> {
    cart.hydrate();
    if cart.state().is_empty() {
        return Err(CommerceError::EmptyCart);
    }
    form.validate()?;

    let confirmation = OrderConfirmation {
        order_id: OrderId::generate(),
        placed_at: Utc::now(),
        ship_to: form.shipping.clone(),
        summary: cart.summary(),
    };
    cart.clear_cart();

    info!(
        order_id = %confirmation.order_id,
        total = %confirmation.summary.totals.total,
        "Order placed"
    );
    Ok(confirmation)
}
