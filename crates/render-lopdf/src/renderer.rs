use crate::metrics::{StandardFont, wrap_text};
use crate::page::PageContext;
use crate::writer::StreamingPdfWriter;
use lopdf::{Dictionary, Object, dictionary};
use productos_render_core::utils::styled_font_name;
use productos_render_core::{CellRendering, RenderError, TableRenderer, TableShape};
use productos_types::{CellValue, Color, Rect, Size};
use std::io::{Seek, Write};
use std::ops::Range;

const PDF_VERSION: &str = "1.7";
const FONT_FAMILY: &str = "Helvetica";

/// Line height as a multiple of the font size.
const LEADING: f32 = 1.2;
const TITLE_LEADING: f32 = 1.5;
/// Distance from the top of a line box to its baseline, as a multiple of the font size.
const ASCENT: f32 = 0.8;

/// Visual style of one kind of table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub font: StandardFont,
    pub font_size: f32,
    pub color: Color,
    pub background: Option<Color>,
    pub padding: f32,
}

/// Page geometry and styling of the product document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStyle {
    pub page_size: Size,
    pub margin: f32,
    pub title: String,
    pub title_font: StandardFont,
    pub title_font_size: f32,
    pub title_color: Color,
    pub spacing_before_table: f32,
    pub header: CellStyle,
    pub body: CellStyle,
    pub border_color: Color,
    pub border_width: f32,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            page_size: Size::a4(),
            margin: 36.0,
            title: "List of products".to_string(),
            title_font: StandardFont::HelveticaBold,
            title_font_size: 18.0,
            title_color: Color::BLUE,
            spacing_before_table: 10.0,
            header: CellStyle {
                font: StandardFont::Helvetica,
                font_size: 12.0,
                color: Color::WHITE,
                background: Some(Color::BLUE),
                padding: 5.0,
            },
            body: CellStyle {
                font: StandardFont::Helvetica,
                font_size: 12.0,
                color: Color::BLACK,
                background: None,
                padding: 2.0,
            },
            border_color: Color::BLACK,
            border_width: 0.5,
        }
    }
}

/// Renders a product table as a paginated PDF: a centered title followed by
/// a bordered table of equal-width columns.
///
/// Every cell is written as text; numeric typing is not preserved in this format.
#[derive(Debug, Clone, Default)]
pub struct PdfTableRenderer {
    style: DocumentStyle,
}

impl PdfTableRenderer {
    pub fn new(style: DocumentStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &DocumentStyle {
        &self.style
    }

    fn usable_width(&self) -> f32 {
        self.style.page_size.width - 2.0 * self.style.margin
    }

    fn bottom_limit(&self) -> f32 {
        self.style.page_size.height - self.style.margin
    }

    /// Writes out the current page and continues at the top margin of a new one.
    fn start_page<W: Write + Seek>(
        &self,
        pdf: &mut StreamingPdfWriter<W>,
        cursor: &mut PageCursor,
    ) -> Result<(), RenderError> {
        let full = std::mem::replace(
            &mut cursor.page,
            PageContext::new(self.style.page_size.height),
        );
        pdf.write_page(full.finish(), self.style.page_size)?;
        cursor.y = self.style.margin;
        cursor.fresh = true;
        Ok(())
    }

    /// Draws the title centered on the page and returns the y below it.
    fn draw_title(&self, page: &mut PageContext, mut y: f32) -> f32 {
        let style = &self.style;
        let size = style.title_font_size;
        let width = self.usable_width();
        for line in wrap_text(&style.title, style.title_font, size, width) {
            let line_width = style.title_font.text_width(&line, size);
            let x = style.margin + (width - line_width).max(0.0) / 2.0;
            page.draw_text(&line, x, y + size, style.title_font, size, style.title_color);
            y += size * TITLE_LEADING;
        }
        y
    }

    fn layout_row(
        &self,
        texts: &[String],
        cell_style: &CellStyle,
        column_width: f32,
    ) -> RowLayout {
        let inner_width = (column_width - 2.0 * cell_style.padding).max(1.0);
        let cells: Vec<Vec<String>> = texts
            .iter()
            .map(|text| wrap_text(text, cell_style.font, cell_style.font_size, inner_width))
            .collect();
        let line_count = cells.iter().map(Vec::len).max().unwrap_or(1);
        RowLayout { cells, line_count }
    }

    /// Draws lines `lines` of every cell of `row` as one bordered band at `y`
    /// and returns the band height.
    fn draw_band(
        &self,
        page: &mut PageContext,
        row: &RowLayout,
        lines: Range<usize>,
        cell_style: &CellStyle,
        y: f32,
        column_width: f32,
    ) -> f32 {
        let size = cell_style.font_size;
        let height = band_height(lines.len(), cell_style);

        for (index, cell_lines) in row.cells.iter().enumerate() {
            let rect = Rect::new(
                self.style.margin + index as f32 * column_width,
                y,
                column_width,
                height,
            );
            if let Some(background) = cell_style.background {
                page.fill_rect(rect, background);
            }
            page.stroke_rect(rect, self.style.border_color, self.style.border_width);

            let visible = cell_lines.get(lines.clone()).unwrap_or_default();
            let first_baseline = rect.y + cell_style.padding + size * ASCENT;
            for (line_index, line) in visible.iter().enumerate() {
                let baseline = first_baseline + line_index as f32 * size * LEADING;
                page.draw_text(
                    line,
                    rect.x + cell_style.padding,
                    baseline,
                    cell_style.font,
                    size,
                    cell_style.color,
                );
            }
        }
        height
    }

    /// Number of lines of `cell_style` that fit between `y` and the bottom margin.
    fn lines_fitting(&self, y: f32, cell_style: &CellStyle) -> usize {
        let room = self.bottom_limit() - y - 2.0 * cell_style.padding;
        if room <= 0.0 {
            return 0;
        }
        (room / (cell_style.font_size * LEADING)).floor() as usize
    }

    fn cell_texts(&self, row: &[CellValue]) -> Vec<String> {
        row.iter()
            .map(|cell| self.cell_rendering().apply(cell).to_display_string())
            .collect()
    }
}

struct RowLayout {
    cells: Vec<Vec<String>>,
    line_count: usize,
}

fn band_height(lines: usize, cell_style: &CellStyle) -> f32 {
    lines as f32 * cell_style.font_size * LEADING + 2.0 * cell_style.padding
}

/// Page being filled, with the layout cursor.
struct PageCursor {
    page: PageContext,
    y: f32,
    fresh: bool,
}

impl TableRenderer for PdfTableRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn file_extension(&self) -> &'static str {
        "pdf"
    }

    fn cell_rendering(&self) -> CellRendering {
        CellRendering::Text
    }

    fn render_to<W: Write + Seek + Send>(
        &self,
        table: &TableShape,
        writer: W,
    ) -> Result<W, RenderError> {
        let style = &self.style;
        if table.column_count() == 0 {
            return Err(RenderError::Other("table has no columns".into()));
        }

        let mut pdf = StreamingPdfWriter::new(writer, PDF_VERSION, font_dictionary())?;
        let column_width = self.usable_width() / table.column_count() as f32;

        let mut cursor = PageCursor {
            page: PageContext::new(style.page_size.height),
            y: 0.0,
            fresh: false,
        };
        cursor.y = self.draw_title(&mut cursor.page, style.margin) + style.spacing_before_table;

        let header_texts: Vec<String> = table.columns().iter().map(|c| c.to_string()).collect();
        let header = self.layout_row(&header_texts, &style.header, column_width);
        cursor.y += self.draw_band(
            &mut cursor.page,
            &header,
            0..header.line_count,
            &style.header,
            cursor.y,
            column_width,
        );

        for row in table.rows() {
            let layout = self.layout_row(&self.cell_texts(row), &style.body, column_width);
            let mut next_line = 0;

            while next_line < layout.line_count {
                let remaining = layout.line_count - next_line;
                let fitting = self.lines_fitting(cursor.y, &style.body);

                if fitting < remaining && !cursor.fresh {
                    self.start_page(&mut pdf, &mut cursor)?;
                    continue;
                }

                // A fresh page always takes at least one line so the loop advances.
                let take = remaining.min(fitting.max(1));
                if take < remaining {
                    log::debug!(
                        "Splitting a {}-line row: {} line(s) on page {}",
                        layout.line_count,
                        take,
                        pdf.page_count() + 1
                    );
                }
                cursor.y += self.draw_band(
                    &mut cursor.page,
                    &layout,
                    next_line..next_line + take,
                    &style.body,
                    cursor.y,
                    column_width,
                );
                cursor.fresh = false;
                next_line += take;

                if next_line < layout.line_count {
                    self.start_page(&mut pdf, &mut cursor)?;
                }
            }
        }
        pdf.write_page(cursor.page.finish(), style.page_size)?;

        log::debug!(
            "Rendered PDF table: {} rows on {} page(s)",
            table.row_count(),
            pdf.page_count()
        );
        Ok(pdf.finish()?)
    }
}

fn font_dictionary() -> Dictionary {
    let mut fonts = Dictionary::new();
    for (font, bold) in [
        (StandardFont::Helvetica, false),
        (StandardFont::HelveticaBold, true),
    ] {
        let base_font = styled_font_name(FONT_FAMILY, bold);
        debug_assert_eq!(base_font, font.base_name());
        fonts.set(
            font.resource_name().as_bytes(),
            Object::Dictionary(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base_font,
                "Encoding" => "WinAnsiEncoding",
            }),
        );
    }
    fonts
}
