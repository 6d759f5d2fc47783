#![cfg_attr(not(test), no_std)]
//! Device-pairing cryptography for heapless embedded targets.
//!
//! This crate is the trust core of a battery-powered controller: it
//! establishes a shared AES key with a paired peer over an untrusted
//! short-range link (PIN-obfuscated Diffie-Hellman), and verifies that a
//! firmware certificate was signed by a trusted authority (RSA-PSS over
//! SHA-512) before anything downstream trusts it.
//!
//! Everything is built on [`BigInt`], a fixed-capacity sign-magnitude
//! integer, and [`Montgomery`], precomputed per-modulus constants for
//! division-free modular multiplication. Exponentiation exists in two
//! shapes: the plain [`Montgomery::power`], and [`PowerState`], the same
//! square-and-multiply loop reified as a value so a cooperative scheduler
//! can advance it one exponent bit per tick.
//!
//! There is no allocator, no threads, and no global state: callers own
//! every value, and randomness comes in through [`rand_core`] traits.

mod digit;
pub use digit::Digit;
mod error;
pub use error::{Error, Result};
mod numbers;
pub use numbers::BigInt;
mod arithmetic;
pub use arithmetic::{Montgomery, PowerState, Reduction};
pub mod diffie;
pub use diffie::{DiffieHellmanSession, KeyStore};
pub mod padding;
pub use padding::verify_checksum;

#[cfg(test)]
pub(crate) mod fixtures;

/// Certificates ship with public exponent `e = 65537`.
///
/// An example recommendation is RFC 4871:
/// https://www.ietf.org/rfc/rfc4871.txt
pub const E: u32 = 0x10001;
