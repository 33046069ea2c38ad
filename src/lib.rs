//! Sapphire II stream cipher engine.
//!
//! Sapphire II is a byte-at-a-time stream cipher built around a 256-byte
//! permutation ("cards") and five index bytes. The same state machine
//! doubles as a keyless compression function, producing variable-length
//! digests usable as a non-cryptographic integrity check.
//!
//! This crate provides the core cipher engine, byte-for-byte compatible
//! with the original reference implementation.
//!
//! # Architecture
//!
//! ```text
//! CipherState (256-byte permutation + rotor/ratchet/avalanche/last_plain/last_cipher)
//!     ↑ shuffled by
//! KeySchedule (key-driven selector — the only point where the key touches state)
//!     ↓ drives
//! Sapphire    (per-byte update, keystream derivation, hash finalization, burn)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt a message:
//!
//! ```
//! use sapphire2::Sapphire;
//!
//! let mut encoder = Sapphire::new_keyed(b"my_secret_key").unwrap();
//! let mut decoder = Sapphire::new_keyed(b"my_secret_key").unwrap();
//!
//! let original = *b"attack at dawn";
//! let mut message = original;
//!
//! encoder.encrypt(&mut message).unwrap();
//! assert_ne!(message, original);
//!
//! decoder.decrypt(&mut message).unwrap();
//! assert_eq!(message, original);
//! ```
//!
//! Hash a byte sequence:
//!
//! ```
//! use sapphire2::Sapphire;
//!
//! let mut hasher = Sapphire::new_hash();
//! let mut data = *b"abc";
//! hasher.encrypt(&mut data).unwrap();
//! let digest = hasher.hash_final(20).unwrap();
//! assert_eq!(digest.len(), 20);
//! ```

#![deny(clippy::all)]

pub mod error;

pub(crate) mod keyrand;
mod sapphire;
pub(crate) mod state;

pub use sapphire::Sapphire;
