//! Coupon commands.

use anyhow::{bail, Result};

use super::cart::print_cart;
use super::{CouponArgs, CouponCommand};
use crate::context::Context;

/// Run the coupon command.
pub fn run(args: CouponArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    match args.command {
        CouponCommand::Apply { code } => {
            let result = cart.apply_coupon(&code);
            if ctx.output.is_json() {
                ctx.output.json(&result);
            }
            if !result.success {
                bail!("{}", result.message);
            }
            ctx.output.success(&result.message);
        }
        CouponCommand::Remove => match cart.remove_coupon() {
            Some(coupon) => ctx.output.success(&format!("Removed coupon {}", coupon.code)),
            None => ctx.output.info("No coupon applied"),
        },
    }

    if !ctx.output.is_json() {
        print_cart(&cart, ctx);
    }
    Ok(())
}
