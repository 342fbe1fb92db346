use crate::{PixelGrid, theme::Color};

/// Measures and draws single-line text onto a grid.
pub trait TextLayout {
    /// Rendered `(width, height)` of `text` in pixels.
    fn measure(&self, text: &str) -> (u32, u32);

    /// Draw `text` with its left edge at `x` and its baseline on row `baseline`.
    fn draw(&self, grid: &mut PixelGrid, text: &str, x: u32, baseline: u32, color: Color);
}

/// Layout for encoding without a font: nothing has extent, nothing is drawn.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoText;

impl TextLayout for NoText {
    fn measure(&self, _text: &str) -> (u32, u32) {
        (0, 0)
    }

    fn draw(&self, _grid: &mut PixelGrid, _text: &str, _x: u32, _baseline: u32, _color: Color) {}
}
