use anyhow::Context;
use certembed_common::{PixelGrid, Sample};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, Pixel, RgbaImage};
use itertools::Itertools;
use std::{io::Cursor, path::Path};

/// Convert a decoded image into a grid, one RGBA8 pixel per sample.
pub fn grid_from_image(image: &DynamicImage) -> anyhow::Result<PixelGrid> {
    let mut rows = Vec::with_capacity(image.height() as usize);
    for (_y, x_lane) in &image.pixels().chunk_by(|(_x, y, _pixel)| *y) {
        rows.push(
            x_lane
                .map(|(_x, _y, pixel)| Sample::from_channels(pixel.to_rgba().0))
                .collect(),
        );
    }

    Ok(PixelGrid::from_rows(rows)?)
}

pub fn image_from_grid(grid: &PixelGrid) -> RgbaImage {
    let bounds = grid.bounds();
    RgbaImage::from_fn(grid.width(), grid.height(), |x, y| {
        let sample = grid
            .get(bounds.min_x + x, bounds.min_y + y)
            .unwrap_or_default();
        image::Rgba(sample.channels())
    })
}

pub fn decode_png(data: &[u8]) -> anyhow::Result<PixelGrid> {
    let image = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()
        .context("failed to decode image")?;
    grid_from_image(&image)
}

pub fn encode_png(grid: &PixelGrid) -> anyhow::Result<Vec<u8>> {
    let mut out = Vec::new();
    image_from_grid(grid)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .context("failed to encode PNG")?;
    Ok(out)
}

pub fn read_grid(path: &Path) -> anyhow::Result<PixelGrid> {
    let image = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    debug!(width = image.width(), height = image.height(), color = ?image.color(), "decoded image");
    grid_from_image(&image)
}

pub fn write_grid(grid: &PixelGrid, path: &Path) -> anyhow::Result<()> {
    image_from_grid(grid)
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))
}
