use productos_render_core::{TableRenderer, TableShape};
use productos_render_xlsx::XlsxTableRenderer;
use productos_types::ProductRecord;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A single `<c>` element of the sheet XML.
#[derive(Debug, PartialEq)]
pub enum SheetCell {
    Number(String),
    Text(String),
}

/// Wrapper around a generated workbook with helpers over its XML parts.
pub struct GeneratedWorkbook {
    pub bytes: Vec<u8>,
    pub workbook_xml: String,
    pub sheet_xml: String,
    pub styles_xml: String,
    pub shared_strings: Vec<String>,
}

impl GeneratedWorkbook {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.clone()))?;
        let mut part = |name: &str| -> Result<String, Box<dyn std::error::Error>> {
            let mut xml = String::new();
            archive.by_name(name)?.read_to_string(&mut xml)?;
            Ok(xml)
        };
        let workbook_xml = part("xl/workbook.xml")?;
        let sheet_xml = part("xl/worksheets/sheet1.xml")?;
        let styles_xml = part("xl/styles.xml")?;
        // No shared string table is written when the sheet has no strings.
        let shared_xml = part("xl/sharedStrings.xml").unwrap_or_default();

        Ok(Self {
            bytes,
            workbook_xml,
            sheet_xml,
            styles_xml,
            shared_strings: parse_shared_strings(&shared_xml),
        })
    }

    pub fn row_count(&self) -> usize {
        self.sheet_xml.matches("<row ").count()
    }

    /// Looks up a cell by its A1 reference, resolving shared strings.
    pub fn cell(&self, reference: &str) -> Option<SheetCell> {
        let start = self.sheet_xml.find(&format!("<c r=\"{reference}\""))?;
        let rest = &self.sheet_xml[start..];
        let end = rest.find("</c>")?;
        let element = &rest[..end];
        let open_tag_end = element.find('>')?;
        let is_shared_string = element[..open_tag_end].contains("t=\"s\"");
        let value = between(element, "<v>", "</v>")?;

        if is_shared_string {
            let index: usize = value.parse().ok()?;
            self.shared_strings.get(index).cloned().map(SheetCell::Text)
        } else {
            Some(SheetCell::Number(value.to_string()))
        }
    }

    /// Widths declared in the `<cols>` block, as `(first column, last column, width)`.
    pub fn column_widths(&self) -> Vec<(u32, u32, f64)> {
        let Some(cols) = between(&self.sheet_xml, "<cols>", "</cols>") else {
            return Vec::new();
        };
        cols.split("<col ")
            .skip(1)
            .filter_map(|col| {
                let min: u32 = attribute(col, "min")?.parse().ok()?;
                let max: u32 = attribute(col, "max")?.parse().ok()?;
                let width: f64 = attribute(col, "width")?.parse().ok()?;
                Some((min, max, width))
            })
            .collect()
    }

    /// Declared width of the 1-based `column`, if any.
    pub fn column_width(&self, column: u32) -> Option<f64> {
        self.column_widths()
            .into_iter()
            .find(|(min, max, _)| (*min..=*max).contains(&column))
            .map(|(_, _, width)| width)
    }

    /// Header texts of row 1, columns A..G.
    pub fn header(&self) -> Vec<String> {
        ["A1", "B1", "C1", "D1", "E1", "F1", "G1"]
            .iter()
            .filter_map(|r| match self.cell(r) {
                Some(SheetCell::Text(t)) => Some(t),
                _ => None,
            })
            .collect()
    }
}

fn between<'a>(haystack: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = haystack.find(open)? + open.len();
    let len = haystack[start..].find(close)?;
    Some(&haystack[start..start + len])
}

/// Value of attribute `name` in an element's attribute text.
fn attribute<'a>(element: &'a str, name: &str) -> Option<&'a str> {
    let key = format!("{name}=\"");
    let (index, _) = element
        .match_indices(key.as_str())
        .find(|(i, _)| *i == 0 || element.as_bytes()[i - 1] == b' ')?;
    let start = index + key.len();
    let len = element[start..].find('"')?;
    Some(&element[start..start + len])
}

fn parse_shared_strings(xml: &str) -> Vec<String> {
    xml.split("<si>")
        .skip(1)
        .filter_map(|si| {
            let t_start = si.find("<t")?;
            let text_start = t_start + si[t_start..].find('>')? + 1;
            let text_end = text_start + si[text_start..].find("</t>")?;
            Some(
                si[text_start..text_end]
                    .replace("&lt;", "<")
                    .replace("&gt;", ">")
                    .replace("&amp;", "&"),
            )
        })
        .collect()
}

pub fn render_products(
    products: &[ProductRecord],
) -> Result<GeneratedWorkbook, Box<dyn std::error::Error>> {
    let table = TableShape::from_products(products);
    let bytes = XlsxTableRenderer::default().render(&table)?;
    GeneratedWorkbook::from_bytes(bytes)
}

pub fn pen() -> ProductRecord {
    ProductRecord {
        id: 1,
        name: "Pen".to_string(),
        reference: "P-100".to_string(),
        price: 1.50,
        weight: 0.01,
        category: "Office".to_string(),
        stock: 500,
    }
}

/// A seekable writer that fails once more than `fail_after` bytes would be written.
pub struct FaultyWriter {
    inner: Cursor<Vec<u8>>,
    fail_after: u64,
}

impl FaultyWriter {
    pub fn new(fail_after: u64) -> Self {
        Self {
            inner: Cursor::new(Vec::new()),
            fail_after,
        }
    }
}

impl Write for FaultyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.inner.position() + buf.len() as u64 > self.fail_after {
            return Err(io::Error::other("simulated write fault"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FaultyWriter {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}
