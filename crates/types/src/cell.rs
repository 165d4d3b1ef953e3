use std::fmt;

/// A single table value, tagged with the type it had on the record.
///
/// Renderers decide whether to keep the native type (spreadsheets) or to
/// flatten everything to text (paginated documents); see
/// `productos_render_core::CellRendering`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl CellValue {
    /// Locale-independent text form of the value.
    ///
    /// Decimals use the shortest representation that round-trips, and always
    /// keep at least one fractional digit, so `2.0` stays distinguishable from
    /// the integer `2`.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Integer(i) => i.to_string(),
            CellValue::Decimal(d) => format_decimal(*d),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

fn format_decimal(value: f64) -> String {
    // 1e16 is where f64 stops representing every integer exactly and `{}`
    // switches to long digit runs.
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
