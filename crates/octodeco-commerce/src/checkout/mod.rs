//! Checkout module.
//!
//! Contains the shipping/billing form, its validation and order placement.

mod address;
mod order;
mod validation;

pub use address::{BillingDetails, ShippingDetails};
pub use order::{place_order, OrderConfirmation};
pub use validation::{
    is_valid_email, CheckoutForm, FieldError, FormSection, ValidationErrors,
    BILLING_REQUIRED_MESSAGE,
};
