//! Text measurement and rasterisation with a TrueType/OpenType font.

use ab_glyph::{Font, FontVec, Glyph, PxScale, ScaleFont, point};
use anyhow::Context;
use certembed_common::{Color, PixelGrid, TextLayout};
use std::{fs, path::Path};

pub struct GlyphLayout {
    font: FontVec,
    scale: PxScale,
}

impl GlyphLayout {
    pub fn from_bytes(data: Vec<u8>, size: f32) -> anyhow::Result<Self> {
        let font = FontVec::try_from_vec(data).context("invalid font data")?;
        Ok(Self {
            font,
            scale: PxScale::from(size),
        })
    }

    pub fn open(path: &Path, size: f32) -> anyhow::Result<Self> {
        let data = fs::read(path)
            .with_context(|| format!("failed to read font {}", path.display()))?;
        Self::from_bytes(data, size)
    }

    /// Position every glyph of `text` on a baseline at `(x, y)`; also returns
    /// the total advance.
    fn layout(&self, text: &str, x: f32, y: f32) -> (Vec<Glyph>, f32) {
        let font = self.font.as_scaled(self.scale);
        let mut caret = x;
        let mut previous = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for c in text.chars() {
            let id = font.glyph_id(c);
            if let Some(previous) = previous {
                caret += font.kern(previous, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, y)));
            caret += font.h_advance(id);
            previous = Some(id);
        }

        (glyphs, caret - x)
    }
}

impl TextLayout for GlyphLayout {
    fn measure(&self, text: &str) -> (u32, u32) {
        let (_, advance) = self.layout(text, 0.0, 0.0);
        let height = self.font.as_scaled(self.scale).height();
        (advance.ceil().max(0.0) as u32, height.ceil().max(0.0) as u32)
    }

    fn draw(&self, grid: &mut PixelGrid, text: &str, x: u32, baseline: u32, color: Color) {
        let (glyphs, _) = self.layout(text, x as f32, baseline as f32);

        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + i64::from(gx);
                let py = bounds.min.y as i64 + i64::from(gy);
                let (Ok(px), Ok(py)) = (u32::try_from(px), u32::try_from(py)) else {
                    return;
                };
                if let Some(slot) = grid.get_mut(px, py) {
                    *slot = color.over(Color::from_sample(*slot), coverage).to_sample();
                }
            });
        }
    }
}
