//! Catalog browsing.

use anyhow::Result;
use octodeco_commerce::catalog::{Catalog, Product};
use octodeco_commerce::ProductId;

use super::{ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::format_price;

/// Run the products command.
pub fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let products: Vec<&Product> = if args.featured {
        ctx.catalog.featured()
    } else {
        ctx.catalog.all().iter().collect()
    };

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(if args.featured {
        "Featured Stickers"
    } else {
        "All Stickers"
    });
    let widths = [4, 22, 8];
    ctx.output.table_row(&["ID", "NAME", "   PRICE"], &widths);
    for product in products {
        let price = format_price(product.price);
        ctx.output.table_row(
            &[product.id.as_str(), product.name.as_str(), price.as_str()],
            &widths,
        );
    }

    Ok(())
}

/// Run the product command.
pub fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let product = find_product(&ctx.catalog, &args.slug)?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("slug", &product.slug);
    ctx.output.kv("price", &product.price.display());
    if product.featured {
        ctx.output.kv("featured", "yes");
    }
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    Ok(())
}

/// Look a product up by id, falling back to slug.
pub fn find_product<'a>(catalog: &'a Catalog, key: &str) -> Result<&'a Product> {
    let key = key.trim();
    if let Some(product) = catalog.by_slug(key) {
        return Ok(product);
    }
    Ok(catalog.require(&ProductId::new(key))?)
}
