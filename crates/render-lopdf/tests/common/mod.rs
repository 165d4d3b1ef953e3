use lopdf::Document as LopdfDocument;
use lopdf::content::{Content, Operation};
use productos_render_core::{TableRenderer, TableShape};
use productos_render_lopdf::PdfTableRenderer;
use productos_types::ProductRecord;
use std::io::{self, Cursor, Seek, SeekFrom, Write};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Decoded content operations of the 1-based `page_number`.
    pub fn page_operations(
        &self,
        page_number: u32,
    ) -> Result<Vec<Operation>, Box<dyn std::error::Error>> {
        let page_id = *self
            .doc
            .get_pages()
            .get(&page_number)
            .ok_or_else(|| format!("no page {page_number}"))?;
        let content = Content::decode(&self.doc.get_page_content(page_id)?)?;
        Ok(content.operations)
    }

    /// Every operator of the given page, for inspecting drawing state.
    pub fn page_operators(
        &self,
        page_number: u32,
    ) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        Ok(self
            .page_operations(page_number)?
            .into_iter()
            .map(|op| op.operator)
            .collect())
    }

    /// Raw `Tj` operand bytes, grouped per page, in drawing order.
    pub fn page_string_bytes(&self) -> Result<Vec<Vec<Vec<u8>>>, Box<dyn std::error::Error>> {
        let mut pages = Vec::new();
        for page_number in 1..=self.page_count() as u32 {
            let strings = self
                .page_operations(page_number)?
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| op.operands.first())
                .filter_map(|operand| operand.as_str().ok())
                .map(<[u8]>::to_vec)
                .collect();
            pages.push(strings);
        }
        Ok(pages)
    }

    /// Strings shown with `Tj`, grouped per page, read as Latin-1.
    pub fn page_strings(&self) -> Result<Vec<Vec<String>>, Box<dyn std::error::Error>> {
        Ok(self
            .page_string_bytes()?
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .map(|bytes| bytes.iter().map(|&b| b as char).collect())
                    .collect()
            })
            .collect())
    }

    /// All `Tj` strings of the document in order.
    pub fn strings(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        Ok(self.page_strings()?.into_iter().flatten().collect())
    }
}

/// Numeric operands of `op`, whether written as integers or reals.
pub fn numbers(op: &Operation) -> Vec<f32> {
    op.operands.iter().filter_map(|o| o.as_float().ok()).collect()
}

pub fn render_products(
    products: &[ProductRecord],
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let table = TableShape::from_products(products);
    let bytes = PdfTableRenderer::default().render(&table)?;
    GeneratedPdf::from_bytes(bytes)
}

pub fn product(id: i64, name: &str, price: f64, stock: i32) -> ProductRecord {
    ProductRecord {
        id,
        name: name.to_string(),
        reference: format!("R-{id}"),
        price,
        weight: 0.25,
        category: "Office".to_string(),
        stock,
    }
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
