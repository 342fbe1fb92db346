//! Canvas composition: the frame packed in the middle of a themed image with
//! a title above it and the digest thumbprint below.

use crate::{
    BYTES_PER_PIXEL, EmbedError, PixelGrid, Point,
    digest::{Digest, Fingerprint},
    dump::{hex, hex_dump},
    frame::{HEADER_PIXELS, build_frame},
    grid::{pack_into_grid, required_rows},
    text::TextLayout,
    theme::Theme,
};

pub const DEFAULT_TITLE: &str = "PKIback.com";
pub const DEFAULT_MARGIN: u32 = 6;
pub const DEFAULT_FONT_SIZE: u32 = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeConfig {
    pub theme: Theme,
    pub title: String,
    /// Gap around the decorations. Clamped to at least one so the border
    /// never touches the frame.
    pub margin: u32,
    /// Line height reserved for the title and the thumbprint.
    pub font_size: u32,
    /// Raster width in samples. Derived from the rendered text when unset.
    pub width: Option<u32>,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            title: DEFAULT_TITLE.to_owned(),
            margin: DEFAULT_MARGIN,
            font_size: DEFAULT_FONT_SIZE,
            width: None,
        }
    }
}

/// Where the frame sits inside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub origin: Point,
    pub width: u32,
    pub rows: u32,
}

#[derive(Clone, Debug)]
pub struct Canvas {
    pub grid: PixelGrid,
    pub placement: Placement,
    pub digest: Digest,
}

/// Short human-readable form of a digest: first and last four bytes.
pub fn thumbprint(digest: &Digest) -> String {
    format!("{}\u{2026}{}", hex(&digest[..4]), hex(&digest[digest.len() - 4..]))
}

pub fn encode(
    payload: &[u8],
    fingerprint: &impl Fingerprint,
    text: &dyn TextLayout,
    config: &EncodeConfig,
) -> Result<Canvas, EmbedError> {
    if payload.is_empty() {
        return Err(EmbedError::EmptyPayload);
    }

    let digest = fingerprint.fingerprint(payload);
    debug!("input:\n{}", hex_dump(payload));
    debug!("digest:\n{}", hex_dump(&digest));

    let thumb = thumbprint(&digest);
    let (title_width, _) = text.measure(&config.title);
    let (thumb_width, _) = text.measure(&thumb);
    let width = config.width.unwrap_or(title_width.max(thumb_width));
    // the scanner only reads headers that sit within one row
    if (width as usize) < HEADER_PIXELS {
        return Err(EmbedError::InvalidWidth(width));
    }

    let frame = build_frame(payload, &digest, width)?;
    let rows = required_rows(frame.len(), width)?;
    info!(
        width,
        samples = frame.len().div_ceil(BYTES_PER_PIXEL),
        rows,
        "laying out frame"
    );

    let margin = config.margin.max(1);
    let font_size = config.font_size;
    let too_large = || EmbedError::PayloadTooLarge(payload.len());
    let rows = u32::try_from(rows).map_err(|_| too_large())?;
    let canvas_width = margin
        .checked_mul(2)
        .and_then(|m| m.checked_add(width))
        .ok_or_else(too_large)?;
    let canvas_height = margin
        .checked_mul(4)
        .and_then(|m| m.checked_add(rows))
        .and_then(|h| h.checked_add(font_size))
        .and_then(|h| h.checked_add(font_size))
        .ok_or_else(too_large)?;

    let theme = &config.theme;
    let mut grid = PixelGrid::new(canvas_width, canvas_height, theme.background.to_sample());

    text.draw(
        &mut grid,
        &config.title,
        canvas_width.saturating_sub(title_width) / 2,
        (margin + font_size).saturating_sub(1),
        theme.foreground,
    );
    text.draw(
        &mut grid,
        &thumb,
        canvas_width.saturating_sub(thumb_width) / 2,
        canvas_height - margin - 1,
        theme.thumbnail,
    );

    let origin = Point::new(margin, canvas_height / 2 - rows / 2 + 1);
    pack_into_grid(&mut grid, &frame, width, origin)?;
    grid.stroke(grid.bounds(), theme.border.to_sample());

    Ok(Canvas {
        grid,
        placement: Placement {
            origin,
            width,
            rows,
        },
        digest,
    })
}
