/// Get the standard-14 PDF font name for a family, with the bold suffix when requested.
pub fn styled_font_name(base_name: &str, bold: bool) -> String {
    if bold {
        format!("{base_name}-Bold")
    } else {
        base_name.to_string()
    }
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}
