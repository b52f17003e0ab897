//! Coupon codes and the registry that validates them.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Message returned when a code is empty or unknown.
pub const INVALID_COUPON_MESSAGE: &str = "Invalid coupon code";

/// Message returned when a coupon is applied to an empty cart.
pub const EMPTY_CART_COUPON_MESSAGE: &str = "Add items to your cart before applying a coupon";

/// A percentage-off coupon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Coupon {
    /// Canonical (trimmed, uppercase) code, e.g. "SAVE10".
    pub code: String,
    /// Percent off the subtotal, 0 to 100.
    pub discount_percent: u8,
    /// Description for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Coupon {
    /// Create a coupon. The code is stored in canonical form.
    pub fn new(code: &str, discount_percent: u32) -> Result<Self, CommerceError> {
        let percent = u8::try_from(discount_percent)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or(CommerceError::InvalidDiscountPercent(discount_percent))?;
        Ok(Self {
            code: normalize_code(code),
            discount_percent: percent,
            description: None,
        })
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Canonical form of a user-entered code: trimmed and uppercased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Fixed lookup table of valid coupons.
///
/// No expiry, usage limits or partial matching: a code is valid exactly when
/// its canonical form is in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponRegistry {
    coupons: Vec<Coupon>,
}

impl CouponRegistry {
    /// Build a registry from an explicit table.
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// The storefront's built-in coupons.
    pub fn builtin() -> Self {
        let table = [
            ("SAVE10", 10, "10% off your order"),
            ("SAVE15", 15, "15% off your order"),
            ("SAVE20", 20, "20% off your order"),
            ("WELCOME25", 25, "25% off for new customers"),
        ];
        let coupons = table
            .into_iter()
            .map(|(code, percent, description)| Coupon {
                code: code.to_string(),
                discount_percent: percent,
                description: Some(description.to_string()),
            })
            .collect();
        Self { coupons }
    }

    /// Validate a user-entered code.
    ///
    /// Returns `None` for an empty (after trimming) or unknown code.
    pub fn validate(&self, code: &str) -> Option<Coupon> {
        let normalized = normalize_code(code);
        if normalized.is_empty() {
            return None;
        }
        self.coupons.iter().find(|c| c.code == normalized).cloned()
    }

    /// All known coupons.
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }
}

impl Default for CouponRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Outcome of applying a coupon code to the cart.
///
/// This is the only cart operation whose result the caller must inspect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CouponResult {
    /// Whether the coupon is now applied.
    pub success: bool,
    /// Human-readable confirmation or error.
    pub message: String,
}

impl CouponResult {
    /// Successful application of `coupon`.
    pub fn applied(coupon: &Coupon) -> Self {
        Self {
            success: true,
            message: format!("Coupon applied: {}% off", coupon.discount_percent),
        }
    }

    /// Empty or unknown code.
    pub fn invalid() -> Self {
        Self {
            success: false,
            message: INVALID_COUPON_MESSAGE.to_string(),
        }
    }

    /// Nothing in the cart to discount.
    pub fn empty_cart() -> Self {
        Self {
            success: false,
            message: EMPTY_CART_COUPON_MESSAGE.to_string(),
        }
    }
}
