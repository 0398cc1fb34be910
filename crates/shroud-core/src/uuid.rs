//! 128-bit identifiers: canonical text form, version metadata, and v7
//! generation.
//!
//! An identifier is 16 opaque bytes. The high nibble of byte 6 is the
//! version (7 for time-ordered, 4 for random-looking), the top two bits of
//! byte 8 are the RFC 4122 variant tag `10`, and a v7 identifier keeps a
//! big-endian 48-bit millisecond timestamp in bytes 0 through 5. Nothing
//! else is interpreted.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Length of the canonical hyphenated text form.
pub const CANONICAL_LEN: usize = 36;

/// Hyphen positions in the canonical 8-4-4-4-12 text form.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// A 128-bit RFC 4122-style identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uuid128([u8; 16]);

impl Uuid128 {
    /// Wraps 16 raw bytes. No validation; all 2^128 values are accepted.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Wraps a byte slice, which must be exactly 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 16] = bytes
            .try_into()
            .map_err(|_| Error::InvalidLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    /// Parses the canonical hyphenated form.
    ///
    /// Accepts exactly 36 characters with hyphens at positions 8, 13, 18
    /// and 23 and 32 hex digits (either case) everywhere else. Anything
    /// else is rejected; [`Display`](fmt::Display) always emits lowercase.
    pub fn parse(text: &str) -> Result<Self> {
        let raw = text.as_bytes();
        if raw.len() != CANONICAL_LEN {
            return Err(Error::InvalidLength(raw.len()));
        }
        for &pos in &HYPHENS {
            if raw[pos] != b'-' {
                return Err(Error::InvalidFormat(
                    "hyphens must sit at positions 8, 13, 18 and 23",
                ));
            }
        }

        let mut digits = [0u8; 32];
        let mut n = 0;
        for (pos, &byte) in raw.iter().enumerate() {
            if HYPHENS.contains(&pos) {
                continue;
            }
            digits[n] = byte;
            n += 1;
        }

        let mut bytes = [0u8; 16];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| Error::InvalidFormat("identifier text must be hex digits"))?;
        Ok(Self(bytes))
    }

    /// Generates a fresh v7 identifier from the system clock and the OS
    /// random number generator.
    #[must_use]
    pub fn generate_v7() -> Self {
        let unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let mut entropy = [0u8; 10];
        OsRng.fill_bytes(&mut entropy);

        Self::v7_from_parts(unix_ms, entropy)
    }

    /// Builds a v7 identifier from an explicit timestamp and payload bytes.
    ///
    /// The timestamp is reduced modulo 2^48 and written big-endian into
    /// bytes 0 through 5. The version nibble and variant bits overwrite
    /// the corresponding entropy bits; the rest of the entropy lands in
    /// bytes 6 through 15 untouched.
    #[must_use]
    pub fn v7_from_parts(unix_ms: u64, entropy: [u8; 10]) -> Self {
        let ts48 = unix_ms & 0x0000_FFFF_FFFF_FFFF;

        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&ts48.to_be_bytes()[2..8]);
        bytes[6..].copy_from_slice(&entropy);

        let mut id = Self(bytes);
        id.set_version(7);
        id.set_variant_rfc4122();
        id
    }

    /// The raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// The raw bytes by value.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// The version nibble: the high 4 bits of byte 6.
    #[must_use]
    pub const fn version(&self) -> u8 {
        (self.0[6] >> 4) & 0x0F
    }

    /// Overwrites the version nibble, preserving the low bits of byte 6.
    pub(crate) fn set_version(&mut self, version: u8) {
        self.0[6] = (self.0[6] & 0x0F) | ((version & 0x0F) << 4);
    }

    /// Forces the RFC 4122 variant tag `10`, preserving the low six bits
    /// of byte 8.
    pub(crate) fn set_variant_rfc4122(&mut self) {
        self.0[8] = (self.0[8] & 0x3F) | 0x80;
    }
}

impl fmt::Display for Uuid128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = hex::encode(self.0);
        write!(
            f,
            "{}-{}-{}-{}-{}",
            &hex[..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..]
        )
    }
}

impl fmt::Debug for Uuid128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid128({})", self)
    }
}

impl FromStr for Uuid128 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Uuid128 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Uuid128 {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Identifier input at the API boundary.
///
/// The convenience entry points accept raw bytes, canonical text, or an
/// already-constructed value; this enum makes that choice explicit and is
/// normalized into a [`Uuid128`] before any masking logic runs.
#[derive(Debug, Clone, Copy)]
pub enum UuidInput<'a> {
    /// 16 raw bytes.
    Bytes(&'a [u8]),
    /// Canonical hyphenated text.
    Text(&'a str),
    /// An already-constructed identifier.
    Id(Uuid128),
}

impl UuidInput<'_> {
    /// Normalizes into an identifier, validating byte and text forms.
    pub fn into_uuid(self) -> Result<Uuid128> {
        match self {
            UuidInput::Bytes(bytes) => Uuid128::from_slice(bytes),
            UuidInput::Text(text) => Uuid128::parse(text),
            UuidInput::Id(id) => Ok(id),
        }
    }
}

impl<'a> From<&'a [u8]> for UuidInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        UuidInput::Bytes(bytes)
    }
}

impl<'a> From<&'a [u8; 16]> for UuidInput<'a> {
    fn from(bytes: &'a [u8; 16]) -> Self {
        UuidInput::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for UuidInput<'a> {
    fn from(text: &'a str) -> Self {
        UuidInput::Text(text)
    }
}

impl From<Uuid128> for UuidInput<'_> {
    fn from(id: Uuid128) -> Self {
        UuidInput::Id(id)
    }
}

impl<'a> From<&'a Uuid128> for UuidInput<'a> {
    fn from(id: &'a Uuid128) -> Self {
        UuidInput::Id(*id)
    }
}
