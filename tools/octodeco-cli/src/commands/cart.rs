//! Cart management commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use octodeco_cache::KvStore;
use octodeco_commerce::cart::CartStore;

use super::products::find_product;
use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{format_discount, format_price};

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { product, quantity } => {
            if quantity == 0 {
                bail!("Quantity must be at least 1");
            }
            let product = find_product(&ctx.catalog, &product)?.clone();
            let name = product.name.clone();
            cart.add_item(product, quantity);
            ctx.output.success(&format!("Added {} x {}", quantity, name));
        }
        CartCommand::Remove { product } => {
            let product = find_product(&ctx.catalog, &product)?;
            if cart.remove_item(&product.id) {
                ctx.output.success(&format!("Removed {}", product.name));
            } else {
                ctx.output.warn(&format!("{} is not in the cart", product.name));
            }
        }
        CartCommand::Update { product, quantity } => {
            let product = find_product(&ctx.catalog, &product)?;
            if !cart.update_quantity(&product.id, quantity) {
                ctx.output.warn(&format!("{} is not in the cart", product.name));
            } else if quantity <= 0 {
                ctx.output.success(&format!("Removed {}", product.name));
            } else {
                ctx.output
                    .success(&format!("{} quantity set to {}", product.name, quantity));
            }
        }
        CartCommand::Clear { yes } => {
            if cart.items().is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove everything from the cart?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.info("Cancelled");
                    return Ok(());
                }
            }
            cart.clear_cart();
            ctx.output.success("Cart cleared");
        }
    }

    print_cart(&cart, ctx);
    Ok(())
}

/// Print the cart lines and totals.
pub fn print_cart<S: KvStore>(cart: &CartStore<S>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&cart.summary());
        return;
    }

    ctx.output.header(&format!("Cart ({})", ctx.session));
    if cart.items().is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [4, 22, 5, 8];
    ctx.output.table_row(&["ID", "NAME", "QTY", "   TOTAL"], &widths);
    for line in cart.items() {
        let quantity = line.quantity.to_string();
        let total = format_price(line.line_total());
        ctx.output.table_row(
            &[
                line.product.id.as_str(),
                line.product.name.as_str(),
                quantity.as_str(),
                total.as_str(),
            ],
            &widths,
        );
    }

    let totals = cart.totals();
    ctx.output.info("");
    ctx.output.kv("items", &totals.item_count.to_string());
    ctx.output.kv("subtotal", &totals.subtotal.display());
    if let Some(coupon) = cart.applied_coupon() {
        ctx.output.kv(
            &format!("discount ({}, {}%)", coupon.code, coupon.discount_percent),
            &format_discount(totals.discount),
        );
    }
    ctx.output.kv("total", &totals.total.display());

    if totals.qualifies_for_free_shipping {
        ctx.output.success("Free shipping!");
    } else if cart.applied_coupon().is_some() {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            totals.remaining_for_free_shipping().display()
        ));
    }
}
