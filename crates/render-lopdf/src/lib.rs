//! Paginated PDF table reports using lopdf.
//!
//! The document is written object by object through `StreamingPdfWriter`,
//! so a finished page's content never has to be kept around. Text uses the
//! non-embedded standard Helvetica faces.

mod encoding;
mod metrics;
mod page;
mod renderer;
mod writer;

pub use metrics::{StandardFont, wrap_text};
pub use renderer::{CellStyle, DocumentStyle, PdfTableRenderer};
pub use writer::StreamingPdfWriter;
