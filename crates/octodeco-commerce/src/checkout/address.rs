//! Shipping and billing details entered at checkout.

use serde::{Deserialize, Serialize};

/// Where the order ships and who receives the confirmation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingDetails {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Confirmation email.
    pub email: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Postal/ZIP code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

impl ShippingDetails {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        [&self.address, &self.city, &self.postal_code, &self.country]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Billing address, either the shipping address or its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingDetails {
    /// Bill to the shipping address; the fields below are ignored.
    pub same_as_shipping: bool,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// Postal/ZIP code.
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Country.
    #[serde(default)]
    pub country: Option<String>,
}

impl BillingDetails {
    /// Bill to the shipping address.
    pub fn same_as_shipping() -> Self {
        Self::default()
    }

    /// Check that every separate-address field is filled in.
    pub fn is_complete(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.address,
            &self.city,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

impl Default for BillingDetails {
    fn default() -> Self {
        Self {
            same_as_shipping: true,
            first_name: None,
            last_name: None,
            address: None,
            city: None,
            postal_code: None,
            country: None,
        }
    }
}
