//! Pixel grid and the row-major frame packer.

use crate::{BYTES_PER_PIXEL, EmbedError, Sample};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Half-open rectangle: `min` is inclusive, `max` exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: width,
            max_y: height,
        }
    }

    pub const fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub const fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Columns from `x` to the right edge, zero when `x` lies outside.
    pub const fn columns_from(&self, x: u32) -> u32 {
        if x < self.min_x { 0 } else { self.max_x.saturating_sub(x) }
    }

    /// Rows from `y` to the bottom edge, zero when `y` lies outside.
    pub const fn rows_from(&self, y: u32) -> u32 {
        if y < self.min_y { 0 } else { self.max_y.saturating_sub(y) }
    }
}

/// A rectangle of samples addressed in absolute coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    bounds: Bounds,
    // layout: Y(X(sample))
    rows: Vec<Vec<Sample>>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, fill: Sample) -> Self {
        Self::with_bounds(Bounds::from_size(width, height), fill)
    }

    pub fn with_bounds(bounds: Bounds, fill: Sample) -> Self {
        let row = vec![fill; bounds.width() as usize];
        Self {
            bounds,
            rows: vec![row; bounds.height() as usize],
        }
    }

    /// Build a grid anchored at `(0, 0)` from top-to-bottom rows.
    pub fn from_rows(rows: Vec<Vec<Sample>>) -> Result<Self, EmbedError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(EmbedError::RaggedRows {
                row,
                expected: width,
                actual: bad.len(),
            });
        }

        Ok(Self {
            bounds: Bounds::from_size(width as u32, rows.len() as u32),
            rows,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Sample> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        Some(self.rows[(y - self.bounds.min_y) as usize][(x - self.bounds.min_x) as usize])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Sample> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        Some(&mut self.rows[(y - self.bounds.min_y) as usize][(x - self.bounds.min_x) as usize])
    }

    /// Writes outside the bounds are dropped.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, sample: Sample) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = sample;
        }
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Sample]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn fill(&mut self, sample: Sample) {
        for row in &mut self.rows {
            row.fill(sample);
        }
    }

    /// Draw a one-sample outline along the inside of `rect`.
    pub fn stroke(&mut self, rect: Bounds, sample: Sample) {
        if rect.width() == 0 || rect.height() == 0 {
            return;
        }

        for x in rect.min_x..rect.max_x {
            self.set(x, rect.min_y, sample);
            self.set(x, rect.max_y - 1, sample);
        }
        for y in rect.min_y..rect.max_y {
            self.set(rect.min_x, y, sample);
            self.set(rect.max_x - 1, y, sample);
        }
    }
}

/// Rows needed to hold `frame_len` bytes at `width` samples per row.
pub fn required_rows(frame_len: usize, width: u32) -> Result<usize, EmbedError> {
    if width == 0 {
        return Err(EmbedError::InvalidWidth(0));
    }
    let samples = frame_len.div_ceil(BYTES_PER_PIXEL);
    Ok(samples.div_ceil(width as usize))
}

/// Lay `frame` into `grid` row-major from `origin`, `width` samples per row.
///
/// The whole `width x rows` rectangle is written once; samples past the end of
/// the frame carry zero content. Returns the number of rows used.
pub fn pack_into_grid(
    grid: &mut PixelGrid,
    frame: &[u8],
    width: u32,
    origin: Point,
) -> Result<usize, EmbedError> {
    let rows = required_rows(frame.len(), width)?;
    let bounds = grid.bounds();
    let available_width = bounds.columns_from(origin.x);
    let available_rows = bounds.rows_from(origin.y);

    if width > available_width || rows > available_rows as usize {
        return Err(EmbedError::InsufficientCanvas {
            needed_width: width,
            needed_rows: u32::try_from(rows).unwrap_or(u32::MAX),
            available_width,
            available_rows,
        });
    }

    let mut chunks = frame.chunks(BYTES_PER_PIXEL);
    for y in origin.y..origin.y + rows as u32 {
        for x in origin.x..origin.x + width {
            let sample = Sample::pack(chunks.next().unwrap_or_default());
            grid.set(x, y, sample);
        }
    }

    Ok(rows)
}

/// Read `length` bytes row-major from `origin`, `width` samples per row.
///
/// The final sample may be only partly consumed. The region must fit
/// horizontally inside the grid.
pub fn unpack_from_grid(
    grid: &PixelGrid,
    origin: Point,
    width: u32,
    length: usize,
) -> Result<Vec<u8>, EmbedError> {
    if width == 0 {
        return Err(EmbedError::InvalidWidth(0));
    }
    let bounds = grid.bounds();
    if width > bounds.columns_from(origin.x) || bounds.rows_from(origin.y) == 0 {
        return Err(EmbedError::TruncatedData {
            needed: length,
            available: 0,
        });
    }

    let mut out = Vec::with_capacity(length + BYTES_PER_PIXEL);
    if length == 0 {
        return Ok(out);
    }

    for y in origin.y..bounds.max_y {
        for x in origin.x..origin.x + width {
            let Some(sample) = grid.get(x, y) else {
                break;
            };
            out.extend_from_slice(&sample.unpack());
            if out.len() >= length {
                out.truncate(length);
                return Ok(out);
            }
        }
    }

    Err(EmbedError::TruncatedData {
        needed: length,
        available: out.len(),
    })
}
