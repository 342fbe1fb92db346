//! The collaborators around the embedding core: image containers, glyph
//! rendering and X.509 parsing.

#[macro_use]
extern crate tracing;

mod certificate;
mod glyph;
mod image_io;

pub use certificate::{CertificateInfo, parse_certificate};
pub use glyph::GlyphLayout;
pub use image_io::{decode_png, encode_png, grid_from_image, image_from_grid, read_grid, write_grid};
