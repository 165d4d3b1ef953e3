use productos_render_core::{CellRendering, RenderError, TableRenderer, TableShape};
use productos_types::CellValue;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::io::{Seek, Write};

const INTEGER_FORMAT: &str = "0";

/// Sheet name and fonts of the product workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStyle {
    pub sheet_name: String,
    pub header_font_size: f64,
    pub body_font_size: f64,
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self {
            sheet_name: "Productos".to_string(),
            header_font_size: 16.0,
            body_font_size: 14.0,
        }
    }
}

/// Renders a product table as a single-sheet workbook: a bold header row
/// followed by one row per product, columns auto-fitted.
#[derive(Debug, Clone, Default)]
pub struct XlsxTableRenderer {
    style: SheetStyle,
}

struct CellFormats {
    header: Format,
    text: Format,
    integer: Format,
    decimal: Format,
}

impl XlsxTableRenderer {
    pub fn new(style: SheetStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &SheetStyle {
        &self.style
    }

    fn formats(&self) -> CellFormats {
        let body = Format::new().set_font_size(self.style.body_font_size);
        CellFormats {
            header: Format::new()
                .set_bold()
                .set_font_size(self.style.header_font_size),
            integer: body.clone().set_num_format(INTEGER_FORMAT),
            decimal: body.clone(),
            text: body,
        }
    }

    fn write_cell(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
        formats: &CellFormats,
    ) -> Result<(), RenderError> {
        match &*self.cell_rendering().apply(value) {
            CellValue::Integer(i) => {
                sheet.write_number_with_format(row, col, *i as f64, &formats.integer)?;
            }
            CellValue::Decimal(d) => {
                sheet.write_number_with_format(row, col, *d, &formats.decimal)?;
            }
            CellValue::Text(s) => {
                sheet.write_string_with_format(row, col, s, &formats.text)?;
            }
        }
        Ok(())
    }
}

impl TableRenderer for XlsxTableRenderer {
    fn content_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    }

    fn file_extension(&self) -> &'static str {
        "xlsx"
    }

    fn cell_rendering(&self) -> CellRendering {
        CellRendering::Native
    }

    fn render_to<W: Write + Seek + Send>(
        &self,
        table: &TableShape,
        mut writer: W,
    ) -> Result<W, RenderError> {
        let formats = self.formats();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.style.sheet_name)?;

        for (col, name) in table.columns().iter().enumerate() {
            sheet.write_string_with_format(0, column_index(col)?, *name, &formats.header)?;
        }

        for (index, row) in table.rows().iter().enumerate() {
            let row_num = u32::try_from(index + 1)
                .map_err(|_| RenderError::Spreadsheet("too many rows for one sheet".into()))?;
            for (col, value) in row.iter().enumerate() {
                self.write_cell(sheet, row_num, column_index(col)?, value, &formats)?;
            }
        }

        sheet.autofit();

        workbook.save_to_writer(&mut writer)?;
        writer.flush()?;
        log::debug!(
            "Rendered workbook sheet '{}' with {} data rows",
            self.style.sheet_name,
            table.row_count()
        );
        Ok(writer)
    }
}

fn column_index(col: usize) -> Result<u16, RenderError> {
    u16::try_from(col)
        .map_err(|_| RenderError::Spreadsheet("too many columns for one sheet".into()))
}
