//! Checkout command.

use anyhow::{bail, Result};
use chrono::Local;
use octodeco_commerce::checkout::{place_order, BillingDetails, CheckoutForm, ShippingDetails};
use octodeco_commerce::CommerceError;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::{format_discount, format_price};

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;
    let form = build_form(args);

    let confirmation = match place_order(&mut cart, &form) {
        Ok(confirmation) => confirmation,
        Err(CommerceError::Validation(errors)) => {
            for error in &errors.errors {
                let flag = flag_name(error.section.as_str(), error.field);
                ctx.output.error(&format!("--{}: {}", flag, error.message));
            }
            bail!("Checkout form has {} error(s)", errors.len());
        }
        Err(CommerceError::EmptyCart) => bail!("Your cart is empty. Add some stickers first."),
        Err(e) => return Err(e.into()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&confirmation);
        return Ok(());
    }

    ctx.output.header("Order placed");
    ctx.output.kv("order", confirmation.order_id.as_str());
    ctx.output.kv(
        "placed",
        &confirmation
            .placed_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
    );
    ctx.output.kv("ship to", &confirmation.ship_to.full_name());
    ctx.output.kv("address", &confirmation.ship_to.one_line());
    ctx.output.info("");
    for line in &confirmation.summary.lines {
        ctx.output.list_item(&format!(
            "{} x {} {}",
            line.quantity,
            line.name,
            format_price(line.line_total).trim_start()
        ));
    }

    let totals = &confirmation.summary.totals;
    ctx.output.kv("subtotal", &totals.subtotal.display());
    if totals.has_discount() {
        ctx.output.kv("discount", &format_discount(totals.discount));
    }
    ctx.output.kv("total", &totals.total.display());
    ctx.output.kv(
        "shipping",
        if confirmation.free_shipping() { "free" } else { "standard" },
    );
    ctx.output
        .success(&format!("Confirmation sent to {}", confirmation.ship_to.email.trim()));

    Ok(())
}

fn build_form(args: CheckoutArgs) -> CheckoutForm {
    let shipping = ShippingDetails {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        address: args.address,
        city: args.city,
        postal_code: args.postal_code,
        country: args.country,
    };

    let billing = if args.separate_billing {
        BillingDetails {
            same_as_shipping: false,
            first_name: args.billing_first_name,
            last_name: args.billing_last_name,
            address: args.billing_address,
            city: args.billing_city,
            postal_code: args.billing_postal_code,
            country: args.billing_country,
        }
    } else {
        BillingDetails::same_as_shipping()
    };

    CheckoutForm { shipping, billing }
}

/// Command-line flag for a form field, e.g. `billing-first-name`.
fn flag_name(section: &str, field: &str) -> String {
    let field = field.replace('_', "-");
    if section == "billing" {
        format!("billing-{}", field)
    } else {
        field
    }
}
