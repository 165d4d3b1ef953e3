//! Spreadsheet table reports.
//!
//! Cells keep their native type: integers and decimals become numeric cells,
//! so spreadsheet tools can sum and sort them without conversion.

mod renderer;

pub use renderer::{SheetStyle, XlsxTableRenderer};
