//! 128-bit masking keys.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// A 128-bit masking key: two independent 64-bit words.
///
/// `k0` whitens the even lanes of the SipHash state and `k1` the odd
/// lanes. Any value is accepted, including zero (valid but weak). The
/// words are wiped when the key is dropped, and `Debug` never prints them.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct FacadeKey {
    k0: u64,
    k1: u64,
}

impl FacadeKey {
    /// Creates a key from explicit words.
    #[must_use]
    pub const fn new(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }

    /// Generates a key from 16 bytes of OS randomness.
    ///
    /// The buffer splits into two little-endian words, low half into `k0`.
    #[must_use]
    pub fn generate() -> Self {
        let mut buf = [0u8; 16];
        OsRng.fill_bytes(&mut buf);

        let k0 = u64::from_le_bytes(buf[..8].try_into().unwrap());
        let k1 = u64::from_le_bytes(buf[8..].try_into().unwrap());
        buf.zeroize();

        Self { k0, k1 }
    }

    /// Parses the `"k0:k1"` hex form produced by [`to_hex`](Self::to_hex).
    ///
    /// The text must split into exactly two `:`-separated hex words.
    pub fn from_hex(text: &str) -> Result<Self> {
        let mut parts = text.split(':');
        let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::InvalidFormat(
                "key text must be two hex words joined by a single ':'",
            ));
        };

        let k0 = u64::from_str_radix(first, 16)
            .map_err(|_| Error::InvalidFormat("key words must be 64-bit hex values"))?;
        let k1 = u64::from_str_radix(second, 16)
            .map_err(|_| Error::InvalidFormat("key words must be 64-bit hex values"))?;
        Ok(Self { k0, k1 })
    }

    /// Formats the key as two lowercase 16-digit hex words joined by `:`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:016x}:{:016x}", self.k0, self.k1)
    }

    /// The word whitening the even SipHash lanes.
    #[must_use]
    pub const fn k0(&self) -> u64 {
        self.k0
    }

    /// The word whitening the odd SipHash lanes.
    #[must_use]
    pub const fn k1(&self) -> u64 {
        self.k1
    }
}

impl fmt::Debug for FacadeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FacadeKey(..)")
    }
}
