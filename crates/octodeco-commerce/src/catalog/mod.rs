//! Product catalog module.
//!
//! The catalog is static: products are defined in code and never mutated by
//! the cart.

mod product;

pub use product::{Catalog, Product};
