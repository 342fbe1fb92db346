//! Channel packing of content bytes into one pixel.
//!
//! A [`Sample`] is the 32-bit value of a single RGBA pixel, read big-endian
//! (red is the most significant byte). The first [`BYTES_PER_PIXEL`] channels
//! carry content; the remaining channel is padding and always written as
//! `0xFF`, which keeps every packed pixel fully opaque.

/// Content bytes carried by one sample.
pub const BYTES_PER_PIXEL: usize = 3;

/// Channels in one sample.
pub const CHANNELS: usize = 4;

const PADDING: u8 = 0xFF;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sample(pub u32);

impl Sample {
    #[inline]
    pub const fn from_channels(channels: [u8; CHANNELS]) -> Self {
        Self(u32::from_be_bytes(channels))
    }

    #[inline]
    pub const fn channels(self) -> [u8; CHANNELS] {
        self.0.to_be_bytes()
    }

    /// Pack up to [`BYTES_PER_PIXEL`] content bytes.
    ///
    /// Missing trailing bytes are written as `0x00`; extra bytes are ignored.
    pub fn pack(content: &[u8]) -> Self {
        let mut channels = [PADDING; CHANNELS];
        for (idx, channel) in channels.iter_mut().take(BYTES_PER_PIXEL).enumerate() {
            *channel = content.get(idx).copied().unwrap_or(0);
        }

        Self::from_channels(channels)
    }

    /// The content bytes, padding discarded.
    pub fn unpack(self) -> [u8; BYTES_PER_PIXEL] {
        let channels = self.channels();
        let mut content = [0; BYTES_PER_PIXEL];
        content.copy_from_slice(&channels[..BYTES_PER_PIXEL]);
        content
    }
}
