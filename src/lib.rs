//! Product catalogue service.
//!
//! CRUD and search over a product store, plus exports of the full product
//! table as a PDF document or an Excel workbook.

pub mod api;
pub mod config;
pub mod error;
pub mod report;
pub mod state;
pub mod store;

pub use error::ServiceError;
pub use report::{RenderedReport, ReportError, ReportKind, ReportService};
