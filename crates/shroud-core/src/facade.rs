//! The reversible transform between v7 identifiers and v4-looking facades.
//!
//! # Design
//!
//! The 48-bit big-endian timestamp in bytes 0 through 5 is XORed with the
//! low 48 bits of a SipHash-2-4 digest. The digest message is built only
//! from bits the transform never rewrites: the low nibble of byte 6, byte
//! 7, the low six bits of byte 8 and bytes 9 through 14. An identifier and
//! its facade therefore derive the same message, both directions compute
//! the same mask, and XOR undoes itself. Encode and decode differ only in
//! the version nibble they stamp at the end.

use crate::error::Result;
use crate::key::FacadeKey;
use crate::siphash::siphash24;
use crate::uuid::{Uuid128, UuidInput};

/// Length of the digest message in bytes.
const SIP_MESSAGE_LEN: usize = 9;

/// Low 48 bits of a digest.
const MASK_48: u64 = 0x0000_FFFF_FFFF_FFFF;

/// Reads a big-endian 48-bit value starting at `offset`.
fn read_48be(bytes: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf[2..].copy_from_slice(&bytes[offset..offset + 6]);
    u64::from_be_bytes(buf)
}

/// Writes the low 48 bits of `value` big-endian starting at `offset`.
fn write_48be(bytes: &mut [u8], offset: usize, value: u64) {
    bytes[offset..offset + 6].copy_from_slice(&value.to_be_bytes()[2..8]);
}

/// Builds the digest message from the bits the transform leaves alone.
/// Identical whether derived from an identifier or from its facade.
fn sip_message(id: &Uuid128) -> [u8; SIP_MESSAGE_LEN] {
    let b = id.as_bytes();
    let mut msg = [0u8; SIP_MESSAGE_LEN];
    msg[0] = b[6] & 0x0F;
    msg[1] = b[7];
    msg[2] = b[8] & 0x3F;
    msg[3..].copy_from_slice(&b[9..15]);
    msg
}

/// The 48-bit timestamp mask for `id` under `key`.
fn mask48(id: &Uuid128, key: &FacadeKey) -> u64 {
    siphash24(&sip_message(id), key.k0(), key.k1()) & MASK_48
}

/// XORs the mask into the timestamp field and stamps the given version
/// nibble and the RFC 4122 variant on a copy.
fn transform(id: &Uuid128, key: &FacadeKey, version: u8) -> Uuid128 {
    let mask = mask48(id, key);

    let mut bytes = id.to_bytes();
    let ts = read_48be(&bytes, 0);
    write_48be(&mut bytes, 0, ts ^ mask);

    let mut out = Uuid128::from_bytes(bytes);
    out.set_version(version);
    out.set_variant_rfc4122();
    out
}

/// Masks a v7 identifier's timestamp, yielding a v4-looking facade.
///
/// The input is neither validated nor mutated; whatever its metadata
/// bits, the result carries version 4 and the RFC 4122 variant.
#[must_use]
pub fn encode(id: &Uuid128, key: &FacadeKey) -> Uuid128 {
    transform(id, key, 4)
}

/// Reverses [`encode`], restoring the original v7 identifier bit for bit.
#[must_use]
pub fn decode(facade: &Uuid128, key: &FacadeKey) -> Uuid128 {
    transform(facade, key, 7)
}

/// Masks an identifier given as raw bytes, canonical text, or an
/// already-constructed [`Uuid128`].
pub fn encode_v4_facade<'a, I>(input: I, key: &FacadeKey) -> Result<Uuid128>
where
    I: Into<UuidInput<'a>>,
{
    Ok(encode(&input.into().into_uuid()?, key))
}

/// Unmasks a facade given as raw bytes, canonical text, or an
/// already-constructed [`Uuid128`].
pub fn decode_v4_facade<'a, I>(input: I, key: &FacadeKey) -> Result<Uuid128>
where
    I: Into<UuidInput<'a>>,
{
    Ok(decode(&input.into().into_uuid()?, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn test_key() -> FacadeKey {
        FacadeKey::new(0x0123456789abcdef, 0xfedcba9876543210)
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let v7 = Uuid128::parse("01921e83-7c3a-7000-8000-000000000001").unwrap();
        let key = test_key();

        let masked = encode(&v7, &key);
        assert_eq!(masked.version(), 4);

        let restored = decode(&masked, &key);
        assert_eq!(restored.version(), 7);
        assert_eq!(restored.as_bytes(), v7.as_bytes());
    }

    #[test]
    fn test_zero_timestamp_scenario() {
        let v7 = Uuid128::parse("00000000-0000-7000-8000-000000000000").unwrap();
        let key = test_key();

        let masked = encode(&v7, &key);
        assert_eq!(masked.version(), 4);
        assert_eq!(masked.as_bytes()[8] & 0xC0, 0x80);
        // The zero timestamp must not survive in the clear.
        assert_ne!(&masked.as_bytes()[..6], &[0u8; 6]);

        let restored = decode(&masked, &key);
        assert_eq!(restored.as_bytes(), v7.as_bytes());
    }

    #[test]
    fn test_payload_bits_untouched() {
        let v7 = Uuid128::parse("01921e83-7c3a-7abc-9def-123456789abc").unwrap();
        let masked = encode(&v7, &test_key());

        let before = v7.as_bytes();
        let after = masked.as_bytes();
        assert_eq!(before[6] & 0x0F, after[6] & 0x0F);
        assert_eq!(before[7], after[7]);
        assert_eq!(before[8] & 0x3F, after[8] & 0x3F);
        assert_eq!(&before[9..], &after[9..]);
    }

    #[test]
    fn test_mask_identical_for_identifier_and_facade() {
        let v7 = Uuid128::parse("01921e83-7c3a-7abc-9def-123456789abc").unwrap();
        let key = test_key();

        let masked = encode(&v7, &key);
        assert_eq!(sip_message(&v7), sip_message(&masked));
        assert_eq!(mask48(&v7, &key), mask48(&masked, &key));
    }

    #[test]
    fn test_metadata_forced_regardless_of_input() {
        // Version 0, variant bits 00: still comes out as a well-formed
        // facade, and decoding stamps v7 without complaint.
        let odd = Uuid128::from_bytes([0u8; 16]);
        let key = test_key();

        let masked = encode(&odd, &key);
        assert_eq!(masked.version(), 4);
        assert_eq!(masked.as_bytes()[8] & 0xC0, 0x80);

        let unmasked = decode(&odd, &key);
        assert_eq!(unmasked.version(), 7);
        assert_eq!(unmasked.as_bytes()[8] & 0xC0, 0x80);
    }

    #[test]
    fn test_different_keys_produce_different_facades() {
        let v7 = Uuid128::parse("01921e83-7c3a-7000-8000-000000000001").unwrap();

        let facade1 = encode(&v7, &test_key());
        let facade2 = encode(&v7, &FacadeKey::new(0xdeadbeefcafebabe, 0x1234567890abcdef));
        assert_ne!(facade1.as_bytes(), facade2.as_bytes());
    }

    #[test]
    fn test_roundtrip_survives_any_payload() {
        let key = test_key();
        for fill in [0x00u8, 0x55, 0xAA, 0xFF] {
            let id = Uuid128::from_bytes([fill; 16]);
            let restored = decode(&encode(&id, &key), &key);
            // Timestamp and payload bits match; version and variant are
            // stamped, so compare everything the transform claims to keep.
            assert_eq!(&restored.as_bytes()[..6], &id.as_bytes()[..6]);
            assert_eq!(restored.as_bytes()[6] & 0x0F, id.as_bytes()[6] & 0x0F);
            assert_eq!(restored.as_bytes()[7], id.as_bytes()[7]);
            assert_eq!(restored.as_bytes()[8] & 0x3F, id.as_bytes()[8] & 0x3F);
            assert_eq!(&restored.as_bytes()[9..], &id.as_bytes()[9..]);
        }
    }

    #[test]
    fn test_48be_helpers() {
        let mut bytes = [0u8; 16];
        write_48be(&mut bytes, 0, 0x0000_0102_0304_0506);
        assert_eq!(&bytes[..6], &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(read_48be(&bytes, 0), 0x0000_0102_0304_0506);

        // High 16 bits of the value never land in the buffer.
        write_48be(&mut bytes, 0, 0xFFFF_0000_0000_0000);
        assert_eq!(&bytes[..6], &[0u8; 6]);
    }

    #[test]
    fn test_convenience_wrappers_accept_all_forms() {
        let key = test_key();
        let v7 = Uuid128::parse("01921e83-7c3a-7000-8000-000000000001").unwrap();

        let from_id = encode_v4_facade(&v7, &key).unwrap();
        let from_text = encode_v4_facade("01921e83-7c3a-7000-8000-000000000001", &key).unwrap();
        let from_bytes = encode_v4_facade(v7.as_bytes(), &key).unwrap();
        assert_eq!(from_id, from_text);
        assert_eq!(from_id, from_bytes);

        let restored = decode_v4_facade(&from_id, &key).unwrap();
        assert_eq!(restored, v7);
    }

    #[test]
    fn test_convenience_wrappers_propagate_parse_errors() {
        let key = test_key();
        assert_eq!(
            encode_v4_facade("not-a-uuid", &key),
            Err(Error::InvalidLength(10))
        );
        assert!(matches!(
            decode_v4_facade("01921e83+7c3a+7000+8000+000000000001", &key),
            Err(Error::InvalidFormat(_))
        ));
    }
}
