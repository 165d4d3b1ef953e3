use crate::encoding::to_win_ansi;
use crate::metrics::StandardFont;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use productos_render_core::utils::flip_y;
use productos_types::{Color, Rect};

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<StandardFont>,
    font_size: f32,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

/// Accumulates the drawing operations of one page.
///
/// Takes coordinates in layout space (origin top-left) and emits PDF
/// operators, skipping state changes that would be redundant.
pub(crate) struct PageContext {
    page_height: f32,
    content: Content,
    state: PageRenderState,
}

impl PageContext {
    pub(crate) fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: Default::default(),
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.unit_components();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        if self.state.stroke_color != Some(color) {
            let [r, g, b] = color.unit_components();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke_color = Some(color);
        }
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }

    fn set_font(&mut self, font: StandardFont, size: f32) {
        if self.state.font != Some(font) || self.state.font_size != size {
            self.push(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some(font);
            self.state.font_size = size;
        }
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        let y = flip_y(rect.bottom(), self.page_height);
        self.push("re", vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]);
        self.push("f", vec![]);
    }

    pub(crate) fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.set_stroke(color, width);
        let y = flip_y(rect.bottom(), self.page_height);
        self.push("re", vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]);
        self.push("S", vec![]);
    }

    /// Draws one line of text whose baseline sits at `baseline_y`.
    pub(crate) fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        baseline_y: f32,
        font: StandardFont,
        size: f32,
        color: Color,
    ) {
        if text.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(font, size);
        self.set_fill_color(color);
        let pdf_y = flip_y(baseline_y, self.page_height);
        self.push("Td", vec![x.into(), pdf_y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }
}
