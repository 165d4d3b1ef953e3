use crate::error::RenderError;
use crate::table::TableShape;
use productos_types::CellValue;
use std::borrow::Cow;
use std::io::{Cursor, Seek, Write};

/// How a renderer treats numeric cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRendering {
    /// Keep integers and decimals as native numeric values.
    Native,
    /// Flatten every value to its display string.
    Text,
}

impl CellRendering {
    pub fn apply<'a>(self, value: &'a CellValue) -> Cow<'a, CellValue> {
        match (self, value) {
            (CellRendering::Native, _) | (CellRendering::Text, CellValue::Text(_)) => {
                Cow::Borrowed(value)
            }
            (CellRendering::Text, other) => Cow::Owned(CellValue::Text(other.to_display_string())),
        }
    }
}

/// A trait for table report encoders.
///
/// Implementations own every intermediate resource (workbook, page buffers)
/// for the duration of a single call; nothing is kept between calls.
pub trait TableRenderer {
    /// MIME type of the produced byte stream.
    fn content_type(&self) -> &'static str;

    /// File extension, without the dot.
    fn file_extension(&self) -> &'static str;

    fn cell_rendering(&self) -> CellRendering;

    /// Encodes `table` into `writer` and hands the writer back once the
    /// output is complete. On error the writer is dropped.
    fn render_to<W: Write + Seek + Send>(
        &self,
        table: &TableShape,
        writer: W,
    ) -> Result<W, RenderError>;

    fn render(&self, table: &TableShape) -> Result<Vec<u8>, RenderError> {
        let cursor = self.render_to(table, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }
}
