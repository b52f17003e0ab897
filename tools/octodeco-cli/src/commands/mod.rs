//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod coupon;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show featured stickers.
    #[arg(short, long)]
    pub featured: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product slug (e.g. "surftocat") or id.
    pub slug: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its totals.
    Show,
    /// Add a sticker to the cart.
    Add {
        /// Product id or slug.
        product: String,
        /// How many to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Remove a sticker from the cart.
    Remove {
        /// Product id or slug.
        product: String,
    },
    /// Set the quantity of a sticker already in the cart (0 or less removes it).
    Update {
        /// Product id or slug.
        product: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the coupon command.
#[derive(Args)]
pub struct CouponArgs {
    #[command(subcommand)]
    pub command: CouponCommand,
}

#[derive(Subcommand)]
pub enum CouponCommand {
    /// Apply a coupon code.
    Apply {
        /// Coupon code (case-insensitive).
        code: String,
    },
    /// Remove the applied coupon.
    Remove,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// First name.
    #[arg(long, default_value = "")]
    pub first_name: String,

    /// Last name.
    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Email for the order confirmation.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Street address.
    #[arg(long, default_value = "")]
    pub address: String,

    /// City.
    #[arg(long, default_value = "")]
    pub city: String,

    /// Postal/ZIP code.
    #[arg(long, default_value = "")]
    pub postal_code: String,

    /// Country.
    #[arg(long, default_value = "")]
    pub country: String,

    /// Bill to a different address (requires every --billing-* flag).
    #[arg(long)]
    pub separate_billing: bool,

    /// Billing first name.
    #[arg(long)]
    pub billing_first_name: Option<String>,

    /// Billing last name.
    #[arg(long)]
    pub billing_last_name: Option<String>,

    /// Billing street address.
    #[arg(long)]
    pub billing_address: Option<String>,

    /// Billing city.
    #[arg(long)]
    pub billing_city: Option<String>,

    /// Billing postal/ZIP code.
    #[arg(long)]
    pub billing_postal_code: Option<String>,

    /// Billing country.
    #[arg(long)]
    pub billing_country: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
