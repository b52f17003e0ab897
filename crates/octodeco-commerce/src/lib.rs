//! Cart and pricing engine for the Octodeco sticker storefront.
//!
//! - **Catalog**: the static sticker catalog
//! - **Cart**: coupon registry, pricing, cart state, the cart store and its
//!   persistence adapter
//! - **Checkout**: form validation and order placement
//!
//! # Example
//!
//! ```rust
//! use octodeco_cache::MemoryStore;
//! use octodeco_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin();
//! let surftocat = catalog.by_slug("surftocat").unwrap().clone();
//!
//! let mut cart = CartStore::open_in(MemoryStore::new());
//! cart.add_item(surftocat, 6);
//! assert!(!cart.qualifies_for_free_shipping());
//!
//! let result = cart.apply_coupon("SAVE20");
//! assert_eq!(result.message, "Coupon applied: 20% off");
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal.display(), "$35.94");
//! assert_eq!(totals.discount.display(), "$7.19");
//! assert_eq!(totals.total.display(), "$28.75");
//! assert!(totals.qualifies_for_free_shipping);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Cart
    pub use crate::cart::{
        CartLine, CartPersistence, CartState, CartStore, CartSummary, CartTotals, Coupon,
        CouponRegistry, CouponResult, Lifecycle, PersistenceError, SaveOutcome,
        FREE_SHIPPING_THRESHOLD,
    };

    // Checkout
    pub use crate::checkout::{
        place_order, BillingDetails, CheckoutForm, OrderConfirmation, ShippingDetails,
        ValidationErrors,
    };
}
