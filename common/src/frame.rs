//! Self-describing frame format.
//!
//! ```text
//! [4 bytes ] magic (big-endian u32)
//! [4 bytes ] payload length in bytes (big-endian u32)
//! [4 bytes ] raster width in samples (big-endian u32)
//! [N bytes ] payload
//! [32 bytes] SHA-256 digest of the payload
//! ```

use crate::{BYTES_PER_PIXEL, EmbedError};

/// Sentinel that opens every frame.
pub const MAGIC: u32 = 0x504b_4901;

pub const HEADER_LEN: usize = 12;

/// Samples covered by the header.
pub const HEADER_PIXELS: usize = HEADER_LEN / BYTES_PER_PIXEL;

pub const DIGEST_LEN: usize = 32;

/// Header plus digest.
pub const FRAME_OVERHEAD: usize = HEADER_LEN + DIGEST_LEN;

const _: () = assert!(HEADER_LEN % BYTES_PER_PIXEL == 0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    pub length: u32,
    pub width: u32,
}

impl Header {
    pub fn is_valid_magic(&self) -> bool {
        self.magic == MAGIC
    }

    /// Total frame size claimed by this header.
    pub fn frame_len(&self) -> usize {
        self.length as usize + FRAME_OVERHEAD
    }
}

pub fn encode_header(length: u32, width: u32) -> [u8; HEADER_LEN] {
    let mut out = [0; HEADER_LEN];
    out[0..4].copy_from_slice(&MAGIC.to_be_bytes());
    out[4..8].copy_from_slice(&length.to_be_bytes());
    out[8..12].copy_from_slice(&width.to_be_bytes());
    out
}

/// Split a header into its fields. Nothing is validated here.
pub fn decode_header(bytes: &[u8; HEADER_LEN]) -> Header {
    let field = |at: usize| {
        u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    };

    Header {
        magic: field(0),
        length: field(4),
        width: field(8),
    }
}

pub fn build_frame(payload: &[u8], digest: &[u8], width: u32) -> Result<Vec<u8>, EmbedError> {
    if digest.len() != DIGEST_LEN {
        return Err(EmbedError::DigestLength {
            expected: DIGEST_LEN,
            actual: digest.len(),
        });
    }
    let length =
        u32::try_from(payload.len()).map_err(|_| EmbedError::PayloadTooLarge(payload.len()))?;

    let mut frame = Vec::with_capacity(payload.len() + FRAME_OVERHEAD);
    frame.extend_from_slice(&encode_header(length, width));
    frame.extend_from_slice(payload);
    frame.extend_from_slice(digest);

    Ok(frame)
}

/// Borrowed view of a frame's three parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameParts<'a> {
    pub header: &'a [u8],
    pub payload: &'a [u8],
    pub digest: &'a [u8],
}

/// Split a frame whose payload is `length` bytes long.
pub fn split_frame(frame: &[u8], length: usize) -> Result<FrameParts<'_>, EmbedError> {
    let needed = length + FRAME_OVERHEAD;
    if frame.len() < needed {
        return Err(EmbedError::TruncatedData {
            needed,
            available: frame.len(),
        });
    }

    let (header, rest) = frame.split_at(HEADER_LEN);
    let (payload, rest) = rest.split_at(length);

    Ok(FrameParts {
        header,
        payload,
        digest: &rest[..DIGEST_LEN],
    })
}
