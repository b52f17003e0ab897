//! Octodeco CLI - a terminal storefront for Octodeco stickers.
//!
//! Commands:
//! - `octodeco products` - List the sticker catalog
//! - `octodeco product` - Show one sticker
//! - `octodeco cart` - Show and change the cart
//! - `octodeco coupon` - Apply or remove a coupon
//! - `octodeco checkout` - Place a (demo) order
//! - `octodeco config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, CheckoutArgs, ConfigArgs, CouponArgs, ProductArgs, ProductsArgs};

/// Octodeco CLI - Browse stickers, fill a cart and check out
#[derive(Parser)]
#[command(name = "octodeco")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Cart session name
    #[arg(short, long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stickers
    Products(ProductsArgs),

    /// Show a sticker
    Product(ProductArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// Apply or remove a coupon
    Coupon(CouponArgs),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let loaded = context::Context::load(
        cli.config.as_deref(),
        cli.session.as_deref(),
        output.clone(),
    );
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_logging(&ctx.config.logging.level, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx),
        Commands::Product(args) => commands::products::show(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Coupon(args) => commands::coupon::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over the configured level; `--verbose` forces debug.
fn init_logging(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
