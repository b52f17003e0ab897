//! Shopping cart module.
//!
//! Contains the coupon registry, pricing calculator, cart state, the
//! persistence adapter and the cart store that ties them together.

mod cart;
mod coupon;
mod persistence;
mod pricing;
mod store;

pub use cart::{CartLine, CartState};
pub use coupon::{
    normalize_code, Coupon, CouponRegistry, CouponResult, EMPTY_CART_COUPON_MESSAGE,
    INVALID_COUPON_MESSAGE,
};
pub use persistence::{
    CartPersistence, LoadedCart, PersistenceError, SaveOutcome, CART_STORAGE_KEY,
    COUPON_STORAGE_KEY,
};
pub use pricing::{
    discount_amount, qualifies_for_free_shipping, CartSummary, CartTotals, LineSummary,
    FREE_SHIPPING_THRESHOLD,
};
pub use store::{CartStore, Lifecycle};
