//! Self-describing certificate frames packed into pixel rasters.
//!
//! A payload is wrapped in a [frame](frame) (magic, length, width, payload,
//! SHA-256 digest) and laid row-major into a [`PixelGrid`], three content bytes
//! per pixel. Recovery needs nothing but the pixels: the [scanner](scan) looks
//! for the frame header at every position, the frame is unpacked from there
//! and its digest is checked before the payload is handed to a parser.
//!
//! ```
//! use certembed_common::{EncodeConfig, NoText, Sha256Fingerprint, decode, encode};
//!
//! let config = EncodeConfig { width: Some(8), ..EncodeConfig::default() };
//! let canvas = encode(b"CERT", &Sha256Fingerprint, &NoText, &config)?;
//!
//! let decoded = decode(&canvas.grid, &Sha256Fingerprint, 1, |bytes| {
//!     Ok::<_, std::convert::Infallible>(bytes.len())
//! })?;
//! assert_eq!(decoded.payload, b"CERT");
//! # Ok::<(), certembed_common::EmbedError>(())
//! ```

#[macro_use]
extern crate tracing;

mod error;
mod sample;

pub mod decode;
pub mod digest;
pub mod dump;
pub mod encode;
pub mod frame;
pub mod grid;
pub mod scan;
pub mod text;
pub mod theme;

pub use decode::{Decoded, Extracted, decode, extract, extract_at, locate};
pub use digest::{Digest, Fingerprint, Sha256Fingerprint};
pub use encode::{Canvas, EncodeConfig, Placement, encode};
pub use error::EmbedError;
pub use grid::{Bounds, PixelGrid, Point};
pub use sample::{BYTES_PER_PIXEL, CHANNELS, Sample};
pub use scan::Location;
pub use text::{NoText, TextLayout};
pub use theme::{Color, Theme};
