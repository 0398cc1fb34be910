//! Keyed masking of time-ordered identifiers.
//!
//! This crate provides:
//! - SipHash-2-4 as the keyed mask source
//! - A 128-bit identifier type with canonical text form and v7 generation
//! - The reversible v7 to v4-facade transform
//! - 128-bit keys with a `k0:k1` hex textual form
//!
//! # Design
//!
//! A v7 identifier carries its creation time in its first 48 bits, so
//! anyone who sees it learns when it was minted and can order it against
//! others. The transform XORs that field with a 48-bit mask computed by
//! SipHash-2-4 over the identifier's untouched payload bits under a secret
//! key, then rewrites the version nibble so the result passes as an
//! ordinary v4 identifier. Holding the key, the same mask is recomputed
//! from the facade and the XOR undone; without it the timestamp field is
//! indistinguishable from the random bits around it.
//!
//! ```
//! use shroud_core::{facade, FacadeKey, Uuid128};
//!
//! let key = FacadeKey::generate();
//! let id = Uuid128::generate_v7();
//!
//! let masked = facade::encode(&id, &key);
//! assert_eq!(masked.version(), 4);
//!
//! let restored = facade::decode(&masked, &key);
//! assert_eq!(restored, id);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod facade;
pub mod key;
pub mod siphash;
pub mod uuid;

pub use error::{Error, Result};
pub use facade::{decode_v4_facade, encode_v4_facade};
pub use key::FacadeKey;
pub use uuid::{Uuid128, UuidInput};
