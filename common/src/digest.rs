use crate::frame::DIGEST_LEN;
use sha2::{Digest as _, Sha256};

pub type Digest = [u8; DIGEST_LEN];

/// Fixed-size integrity fingerprint over payload bytes.
pub trait Fingerprint {
    fn fingerprint(&self, data: &[u8]) -> Digest;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Fingerprint;

impl Fingerprint for Sha256Fingerprint {
    fn fingerprint(&self, data: &[u8]) -> Digest {
        Sha256::digest(data).into()
    }
}

impl<F> Fingerprint for F
where
    F: Fn(&[u8]) -> Digest,
{
    fn fingerprint(&self, data: &[u8]) -> Digest {
        self(data)
    }
}
