//! Header discovery at an unknown position.
//!
//! Every coordinate is tried in row-major order, top-left first, and the first
//! plausible header wins. Worst case is one header read per sample of the grid.

use crate::{
    BYTES_PER_PIXEL, PixelGrid, Point,
    frame::{FRAME_OVERHEAD, HEADER_LEN, HEADER_PIXELS, decode_header},
};
use std::{
    ops::Range,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

/// Where a frame was found and what its header claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub origin: Point,
    pub length: u32,
    pub width: u32,
}

impl Location {
    /// Bytes to unpack from `origin`: header, payload and digest.
    pub fn frame_len(&self) -> usize {
        self.length as usize + FRAME_OVERHEAD
    }
}

/// Test whether a plausible frame header starts at `(x, y)`.
///
/// A header is accepted when the magic matches, the claimed width fits in the
/// columns right of `x`, and the claimed frame fits in the rows from `y` down.
pub fn header_at(grid: &PixelGrid, x: u32, y: u32) -> Option<Location> {
    let bounds = grid.bounds();
    let columns = bounds.columns_from(x);
    if (columns as usize) < HEADER_PIXELS {
        return None;
    }

    let mut raw = [0; HEADER_LEN];
    for (idx, chunk) in raw.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
        chunk.copy_from_slice(&grid.get(x + idx as u32, y)?.unpack());
    }

    let header = decode_header(&raw);
    if !header.is_valid_magic() || header.width > columns {
        return None;
    }

    let capacity =
        u64::from(bounds.rows_from(y)) * u64::from(header.width) * BYTES_PER_PIXEL as u64;
    if u64::from(header.length) + FRAME_OVERHEAD as u64 > capacity {
        return None;
    }

    Some(Location {
        origin: Point::new(x, y),
        length: header.length,
        width: header.width,
    })
}

/// First accepted header in row-major order, if any.
pub fn find_frame(grid: &PixelGrid) -> Option<Location> {
    let bounds = grid.bounds();
    scan_band(grid, bounds.min_y..bounds.max_y, || false)
}

/// Same result as [`find_frame`], with the rows split into contiguous bands
/// scanned on `threads` threads.
pub fn find_frame_parallel(grid: &PixelGrid, threads: usize) -> Option<Location> {
    let bounds = grid.bounds();
    let height = bounds.height() as usize;
    let threads = threads.clamp(1, height.max(1));
    if threads == 1 {
        return find_frame(grid);
    }

    let band = height.div_ceil(threads) as u32;
    // lowest band index that has produced a match so far
    let earliest = AtomicUsize::new(usize::MAX);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|idx| {
                let start = (bounds.min_y + idx as u32 * band).min(bounds.max_y);
                let end = (start + band).min(bounds.max_y);
                let earliest = &earliest;

                scope.spawn(move || {
                    let abandon = || earliest.load(Ordering::Relaxed) < idx;
                    let found = scan_band(grid, start..end, abandon);
                    if found.is_some() {
                        earliest.fetch_min(idx, Ordering::Relaxed);
                    }
                    found
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .find_map(|found| found)
    })
}

fn scan_band(grid: &PixelGrid, rows: Range<u32>, abandon: impl Fn() -> bool) -> Option<Location> {
    let bounds = grid.bounds();
    for y in rows {
        if abandon() {
            return None;
        }
        for x in bounds.min_x..bounds.max_x {
            if let Some(location) = header_at(grid, x, y) {
                return Some(location);
            }
        }
    }
    None
}
