//! Checkout form validation.

use crate::checkout::{BillingDetails, ShippingDetails};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Message attached to `billing.first_name` when a separate billing address
/// is incomplete.
pub const BILLING_REQUIRED_MESSAGE: &str = "Billing address is required when not same as shipping";

/// Which part of the form a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSection {
    /// Shipping details.
    Shipping,
    /// Billing details.
    Billing,
}

impl FormSection {
    /// Section name as used in field paths, e.g. "shipping".
    pub fn as_str(&self) -> &'static str {
        match self {
            FormSection::Shipping => "shipping",
            FormSection::Billing => "billing",
        }
    }
}

/// One failed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form section.
    pub section: FormSection,
    /// Field name, e.g. "postal_code".
    pub field: &'static str,
    /// User-facing message.
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.section.as_str(), self.field, self.message)
    }
}

/// Every failure found in a checkout form, in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{}", format_errors(.errors))]
pub struct ValidationErrors {
    /// Failed fields.
    pub errors: Vec<FieldError>,
}

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Get the message for a field, if it failed.
    pub fn for_field(&self, section: FormSection, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.section == section && e.field == field)
            .map(|e| e.message)
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Everything the checkout page collects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Shipping details.
    pub shipping: ShippingDetails,
    /// Billing details.
    #[serde(default)]
    pub billing: BillingDetails,
}

impl CheckoutForm {
    /// Create a form billed to the shipping address.
    pub fn new(shipping: ShippingDetails) -> Self {
        Self {
            shipping,
            billing: BillingDetails::default(),
        }
    }

    /// Validate every field, collecting all failures.
    ///
    /// Values are trimmed before checking, so whitespace-only input counts
    /// as missing.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        let s = &self.shipping;

        require(&mut errors, "first_name", &s.first_name, "First name is required");
        require(&mut errors, "last_name", &s.last_name, "Last name is required");
        if require(&mut errors, "email", &s.email, "Email is required")
            && !is_valid_email(s.email.trim())
        {
            errors.push(FieldError {
                section: FormSection::Shipping,
                field: "email",
                message: "Please enter a valid email",
            });
        }
        require(&mut errors, "address", &s.address, "Address is required");
        require(&mut errors, "city", &s.city, "City is required");
        require(&mut errors, "postal_code", &s.postal_code, "Postal code is required");
        require(&mut errors, "country", &s.country, "Country is required");

        if !self.billing.same_as_shipping && !self.billing.is_complete() {
            errors.push(FieldError {
                section: FormSection::Billing,
                field: "first_name",
                message: BILLING_REQUIRED_MESSAGE,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

/// Push a shipping error when `value` is blank. Returns whether it was present.
fn require(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    message: &'static str,
) -> bool {
    if value.trim().is_empty() {
        errors.push(FieldError {
            section: FormSection::Shipping,
            field,
            message,
        });
        return false;
    }
    true
}

/// Loose address check: something@something.tld with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern should compile")
        })
        .is_match(email)
}
