use productos_types::{CellValue, ProductRecord};

/// Canonical column order for every product report, whatever the output format.
pub const PRODUCT_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "reference",
    "price",
    "weight",
    "category",
    "stock",
];

/// Header + body rows, built fresh for each export and dropped after rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TableShape {
    columns: &'static [&'static str],
    rows: Vec<Vec<CellValue>>,
}

impl TableShape {
    /// Projects the records, in order, onto the fixed product columns.
    pub fn from_products(records: &[ProductRecord]) -> Self {
        let rows: Vec<Vec<CellValue>> = records.iter().map(product_row).collect();
        log::debug!(
            "Built product table: {} columns, {} rows",
            PRODUCT_COLUMNS.len(),
            rows.len()
        );
        Self {
            columns: &PRODUCT_COLUMNS,
            rows,
        }
    }

    pub fn columns(&self) -> &[&'static str] {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One record as a row, in `PRODUCT_COLUMNS` order.
pub fn product_row(product: &ProductRecord) -> Vec<CellValue> {
    vec![
        CellValue::Integer(product.id),
        CellValue::Text(product.name.clone()),
        CellValue::Text(product.reference.clone()),
        CellValue::Decimal(product.price),
        CellValue::Decimal(product.weight),
        CellValue::Text(product.category.clone()),
        CellValue::Integer(product.stock.into()),
    ]
}
