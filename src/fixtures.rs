//! Shared helpers for the test suite.

use hex_literal::hex;
use rand_core::{impls, CryptoRng, RngCore};

use crate::BigInt;

/// xorshift64. Deterministic, seedable, and emphatically not
/// cryptographic — exactly what reproducible tests want. Seed must be
/// non-zero.
pub struct TestRng(pub u64);

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        debug_assert_ne!(self.0, 0);
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// the protocol APIs insist on CryptoRng; for tests, determinism wins
impl CryptoRng for TestRng {}

/// An odd 256-bit modulus (SHA-256 of the empty string, last bit set by
/// luck). Montgomery arithmetic only needs oddness, not primality.
pub fn n256() -> BigInt<20> {
    BigInt::from_be_bytes(&hex!(
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    ))
}

/// `2^exponent - 1`.
pub fn mersenne<const L: usize>(exponent: usize) -> BigInt<L> {
    (&BigInt::one() << exponent).unsigned_sub(&BigInt::one())
}

/// A 1128-bit RSA-style modulus whose factorization is public knowledge:
/// the product of the Mersenne primes `2^521 - 1` and `2^607 - 1`.
pub fn rsa_modulus() -> BigInt<72> {
    &mersenne::<72>(521) * &mersenne::<72>(607)
}

/// The private exponent matching [`rsa_modulus`] and the public exponent
/// [`E`][crate::E].
pub fn rsa_private_exponent() -> BigInt<72> {
    let p_minus_1 = mersenne::<72>(521).unsigned_sub(&BigInt::one());
    let q_minus_1 = mersenne::<72>(607).unsigned_sub(&BigInt::one());
    let phi = &p_minus_1 * &q_minus_1;
    BigInt::from(crate::E).mod_inverse(&phi).unwrap()
}

/// Square-and-multiply straight over [`div_rem`][BigInt::div_rem], as an
/// oracle independent of the Montgomery machinery.
pub fn oracle_pow_mod<const L: usize>(
    base: &BigInt<L>,
    exponent: &BigInt<L>,
    modulus: &BigInt<L>,
) -> BigInt<L> {
    let mut result = BigInt::one().div_rem(modulus).1;
    let msb = match exponent.msb() {
        Some(msb) => msb,
        None => return result,
    };
    for i in (0..=msb).rev() {
        result = (&result * &result).div_rem(modulus).1;
        if exponent.bit(i) {
            result = (&result * base).div_rem(modulus).1;
        }
    }
    result
}
