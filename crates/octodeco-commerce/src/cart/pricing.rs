//! Cart pricing calculations.
//!
//! Everything here is a pure function of the cart lines and the applied
//! coupon. Totals are recomputed on every read and never stored.

use crate::cart::{CartLine, Coupon};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Orders whose discounted total reaches this amount ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(2500);

/// Discount granted by `coupon` on `subtotal`.
///
/// Always computed from the pre-discount subtotal and rounded half-up to the
/// cent. Never exceeds `subtotal` for a non-negative subtotal.
pub fn discount_amount(subtotal: Money, coupon: &Coupon) -> Money {
    subtotal.percentage(coupon.discount_percent)
}

/// Whether a discounted total reaches the free-shipping threshold.
///
/// Free shipping is a coupon perk: [`CartTotals`] only sets its flag when a
/// coupon is applied and this returns true.
pub fn qualifies_for_free_shipping(total: Money) -> bool {
    total >= FREE_SHIPPING_THRESHOLD
}

/// Every derived cart value, from one computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line quantities.
    pub item_count: u64,
    /// Sum of price x quantity.
    pub subtotal: Money,
    /// Coupon discount (zero without a coupon).
    pub discount: Money,
    /// Subtotal minus discount.
    pub total: Money,
    /// Percent of the applied coupon, if any.
    pub discount_percent: Option<u8>,
    /// A coupon is applied and the total reaches [`FREE_SHIPPING_THRESHOLD`].
    pub qualifies_for_free_shipping: bool,
}

impl CartTotals {
    /// Compute totals for `lines` with an optional coupon.
    pub fn calculate(lines: &[CartLine], coupon: Option<&Coupon>) -> Self {
        let item_count = lines.iter().map(|l| u64::from(l.quantity)).sum();
        let subtotal: Money = lines.iter().map(CartLine::line_total).sum();
        let discount = coupon
            .map(|c| discount_amount(subtotal, c))
            .unwrap_or_else(Money::zero);
        let total = subtotal.saturating_sub_floor_zero(discount);

        Self {
            item_count,
            subtotal,
            discount,
            total,
            discount_percent: coupon.map(|c| c.discount_percent),
            qualifies_for_free_shipping: coupon.is_some() && qualifies_for_free_shipping(total),
        }
    }

    /// Check if a discount is in effect.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }

    /// How far the discounted total is below the free-shipping threshold.
    pub fn remaining_for_free_shipping(&self) -> Money {
        FREE_SHIPPING_THRESHOLD.saturating_sub_floor_zero(self.total)
    }
}

/// One line of a [`CartSummary`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineSummary {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// unit_price x quantity.
    pub line_total: Money,
}

/// Snapshot of the cart handed to the checkout boundary and the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSummary {
    /// Lines in insertion order.
    pub lines: Vec<LineSummary>,
    /// Applied coupon.
    pub coupon: Option<Coupon>,
    /// Derived totals.
    pub totals: CartTotals,
}

impl CartSummary {
    /// Build a summary from cart lines and the applied coupon.
    pub fn from_lines(lines: &[CartLine], coupon: Option<&Coupon>) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|l| LineSummary {
                    product_id: l.product.id.clone(),
                    name: l.product.name.clone(),
                    unit_price: l.product.price,
                    quantity: l.quantity,
                    line_total: l.line_total(),
                })
                .collect(),
            coupon: coupon.cloned(),
            totals: CartTotals::calculate(lines, coupon),
        }
    }

    /// Check if the summary has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
