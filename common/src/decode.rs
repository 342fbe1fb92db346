//! Frame recovery: locate, unpack, split, verify, then hand the payload on.

use crate::{
    EmbedError, PixelGrid,
    digest::{Digest, Fingerprint},
    dump::hex_dump,
    frame::{HEADER_LEN, split_frame},
    grid::unpack_from_grid,
    scan::{Location, find_frame, find_frame_parallel},
};

/// A verified frame lifted out of a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extracted {
    pub location: Location,
    pub header: [u8; HEADER_LEN],
    pub payload: Vec<u8>,
    pub digest: Digest,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded<T> {
    pub location: Location,
    pub payload: Vec<u8>,
    pub certificate: T,
}

/// Find the first frame header, scanning on `threads` threads.
pub fn locate(grid: &PixelGrid, threads: usize) -> Result<Location, EmbedError> {
    let found = if threads > 1 {
        find_frame_parallel(grid, threads)
    } else {
        find_frame(grid)
    };

    let location = found.ok_or(EmbedError::NotFound)?;
    info!(
        x = location.origin.x,
        y = location.origin.y,
        length = location.length,
        width = location.width,
        "frame found"
    );
    Ok(location)
}

/// Unpack and verify the frame at a known location.
pub fn extract_at(
    grid: &PixelGrid,
    location: Location,
    fingerprint: &impl Fingerprint,
) -> Result<Extracted, EmbedError> {
    let frame = unpack_from_grid(grid, location.origin, location.width, location.frame_len())?;
    let parts = split_frame(&frame, location.length as usize)?;

    debug!("header:\n{}", hex_dump(parts.header));
    debug!("payload:\n{}", hex_dump(parts.payload));
    debug!("digest:\n{}", hex_dump(parts.digest));

    let computed = fingerprint.fingerprint(parts.payload);
    if computed[..] != *parts.digest {
        return Err(EmbedError::Integrity);
    }

    let mut header = [0; HEADER_LEN];
    header.copy_from_slice(parts.header);

    Ok(Extracted {
        location,
        header,
        payload: parts.payload.to_vec(),
        digest: computed,
    })
}

pub fn extract(
    grid: &PixelGrid,
    fingerprint: &impl Fingerprint,
    threads: usize,
) -> Result<Extracted, EmbedError> {
    let location = locate(grid, threads)?;
    extract_at(grid, location, fingerprint)
}

/// Extract, verify and parse the embedded certificate.
///
/// Parser errors are returned unchanged as the source of
/// [`EmbedError::Certificate`].
pub fn decode<T, E>(
    grid: &PixelGrid,
    fingerprint: &impl Fingerprint,
    threads: usize,
    parse: impl FnOnce(&[u8]) -> Result<T, E>,
) -> Result<Decoded<T>, EmbedError>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let Extracted {
        location, payload, ..
    } = extract(grid, fingerprint, threads)?;
    let certificate = parse(&payload).map_err(|err| EmbedError::Certificate(err.into()))?;

    Ok(Decoded {
        location,
        payload,
        certificate,
    })
}
