//! SipHash-2-4 keyed pseudorandom function.
//!
//! The mask source for the facade transform: a 128-bit key given as two
//! 64-bit words and an arbitrary-length message map to a 64-bit digest.
//! The schedule follows the SipHash reference exactly: 8-byte
//! little-endian blocks, the total message length (mod 256) in the top
//! byte of the final padded block, two compression rounds per block and
//! four finalization rounds.

const INIT_V0: u64 = 0x736f6d6570736575;
const INIT_V1: u64 = 0x646f72616e646f6d;
const INIT_V2: u64 = 0x6c7967656e657261;
const INIT_V3: u64 = 0x7465646279746573;

/// Computes the SipHash-2-4 digest of `data` under the key `(k0, k1)`.
///
/// Deterministic and total: any message length is valid, including empty.
#[must_use]
pub fn siphash24(data: &[u8], k0: u64, k1: u64) -> u64 {
    let mut v0 = INIT_V0 ^ k0;
    let mut v1 = INIT_V1 ^ k1;
    let mut v2 = INIT_V2 ^ k0;
    let mut v3 = INIT_V3 ^ k1;

    let mut blocks = data.chunks_exact(8);
    for block in &mut blocks {
        let m = u64::from_le_bytes(block.try_into().unwrap());
        v3 ^= m;
        sipround(&mut v0, &mut v1, &mut v2, &mut v3);
        sipround(&mut v0, &mut v1, &mut v2, &mut v3);
        v0 ^= m;
    }

    // Final block: trailing bytes packed little-endian into the low bits,
    // message length (mod 256) in the top byte. A zero-length remainder
    // still produces this block.
    let mut b = (data.len() as u64) << 56;
    for (i, &byte) in blocks.remainder().iter().enumerate() {
        b |= u64::from(byte) << (8 * i);
    }

    v3 ^= b;
    sipround(&mut v0, &mut v1, &mut v2, &mut v3);
    sipround(&mut v0, &mut v1, &mut v2, &mut v3);
    v0 ^= b;

    v2 ^= 0xff;
    for _ in 0..4 {
        sipround(&mut v0, &mut v1, &mut v2, &mut v3);
    }

    v0 ^ v1 ^ v2 ^ v3
}

/// One ARX compression round. All additions wrap mod 2^64.
#[inline]
fn sipround(v0: &mut u64, v1: &mut u64, v2: &mut u64, v3: &mut u64) {
    *v0 = v0.wrapping_add(*v1);
    *v2 = v2.wrapping_add(*v3);
    *v1 = v1.rotate_left(13);
    *v3 = v3.rotate_left(16);
    *v1 ^= *v0;
    *v3 ^= *v2;
    *v0 = v0.rotate_left(32);
    *v2 = v2.wrapping_add(*v1);
    *v0 = v0.wrapping_add(*v3);
    *v1 = v1.rotate_left(17);
    *v3 = v3.rotate_left(21);
    *v1 ^= *v2;
    *v3 ^= *v0;
    *v2 = v2.rotate_left(32);
}
