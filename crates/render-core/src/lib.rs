//! Core abstractions for turning product records into rendered table reports.
//!
//! This crate provides the pieces every output format shares:
//! - `TableShape`, the header + rows projection of a product list
//! - `TableRenderer`, the trait each encoder (PDF, XLSX) implements
//! - `CellRendering`, the per-format policy for native vs. text cells
//! - Error types for rendering operations

mod error;
mod table;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use table::{PRODUCT_COLUMNS, TableShape, product_row};
pub use traits::{CellRendering, TableRenderer};
