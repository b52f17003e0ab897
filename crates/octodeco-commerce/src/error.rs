//! Commerce error types.

use crate::checkout::ValidationErrors;
use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Cart mutators never return these: not-found conditions are no-ops and
/// storage failures are recovered inside the cart store. They surface from
/// construction-time checks, catalog lookups and checkout.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Coupon percentage outside 0..=100.
    #[error("Invalid discount percent: {0} (must be 0-100)")]
    InvalidDiscountPercent(u32),

    /// Checkout attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Checkout form failed validation.
    #[error("Checkout form is invalid: {0}")]
    Validation(#[from] ValidationErrors),
}
