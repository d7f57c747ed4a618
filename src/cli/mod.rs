//! The `sku-args` command-line tool
//!
//! Its flags are declared with [`crate::Arguments`] like any other schema.

pub mod output;
pub mod sku;

pub use sku::{OutputFormat, SkuArguments};
