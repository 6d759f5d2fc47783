//! RSA-PSS signature verification over SHA-512.
//!
//! Main reference is RFC 8017 (PKCS #1 v2.2), with the firmware's fixed
//! choices baked in: the digest is SHA-512, the mask generating function
//! is MGF1 over the same digest, the salt is one digest wide, and the
//! padding constant sits between the zero fill and the salt.
//!
//! Verification is a pure predicate of (public key, checksum, signature)
//! — a single mismatch anywhere is a hard rejection, with no partial
//! state left behind for a retry to observe.

use core::cmp::Ordering;

use digest::Digest;
use sha2::Sha512;

use crate::digit::DIGIT_BYTES;
use crate::{BigInt, Montgomery};

/// SHA-512 digest width.
const HASH_BYTES: usize = 64;

/// The fixed block between the zero fill and the salt in the decoded
/// message. A verifier checks it byte for byte; it doubles as the domain
/// separator in the final hash.
const PSS_PAD: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

/// XOR `data` in place with the MGF1 mask expanded from `seed`.
///
/// Cf. RFC 8017, B.2.1: mask block `i` is `H(seed ‖ i)` with a 4-byte
/// big-endian counter starting at 0.
fn xor_mgf1<H: Digest>(hasher: &mut H, seed: &[u8], data: &mut [u8]) {
    for (counter, chunk) in data.chunks_mut(H::output_size()).enumerate() {
        hasher.update(seed);
        hasher.update(&(counter as u32).to_be_bytes());
        let mask = hasher.finalize_reset();
        for (byte, mask_byte) in chunk.iter_mut().zip(mask.iter()) {
            *byte ^= mask_byte;
        }
    }
}

/// Verify an RSA-PSS/SHA-512 signature over `checksum`.
///
/// `mont` is the context of the public modulus, `exponent` the public
/// exponent (conventionally [`E`][crate::E]). The signature must be
/// exactly as many bytes as the modulus; its value must be below the
/// modulus.
///
/// `true` means the signature is valid; every other path is a rejection,
/// and callers must refuse to trust the payload behind the checksum.
pub fn verify_checksum<const L: usize>(
    mont: &Montgomery<L>,
    exponent: &BigInt<L>,
    checksum: &[u8; HASH_BYTES],
    signature: &[u8],
) -> bool {
    let n_bits = mont.bits();
    if signature.len() != (n_bits + 7) / 8 {
        return false;
    }
    let em_len = n_bits / 8;
    if em_len < 2 * HASH_BYTES + PSS_PAD.len() {
        // modulus too narrow to ever carry salt, hash and padding
        return false;
    }

    let s = BigInt::<L>::from_be_bytes(signature);
    if s.cmp_magnitude(mont.modulus()) != Ordering::Less {
        return false;
    }

    // s^e mod n recovers the encoded message
    let em = mont.from_montgomery(&mont.power(&mont.to_montgomery(&s), exponent));

    // the top filler bits only keep the encoded value below n; they must
    // come off clean
    let (em, lost) = em.shr(n_bits % 8);
    if lost {
        return false;
    }

    let mut em = em.swap_order();
    let bytes = &mut em.as_bytes_mut()[L * DIGIT_BYTES - em_len..];
    // the trailing hash block is not masked; it is the MGF seed
    let (db, h) = bytes.split_at_mut(em_len - HASH_BYTES);
    let mut seed = [0u8; HASH_BYTES];
    seed.copy_from_slice(h);

    let mut hasher = Sha512::new();
    xor_mgf1(&mut hasher, &seed, db);

    let ps_len = db.len() - HASH_BYTES - PSS_PAD.len();
    if db[..ps_len].iter().any(|&byte| byte != 0) {
        return false;
    }
    if db[ps_len..ps_len + PSS_PAD.len()] != PSS_PAD {
        return false;
    }
    let salt = &db[ps_len + PSS_PAD.len()..];

    let mut hasher = Sha512::new();
    hasher.update(salt);
    hasher.update(checksum);
    hasher.update(&PSS_PAD);
    hasher.finalize().as_slice() == &h[..]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures::{n256, rsa_modulus, rsa_private_exponent, TestRng};
    use rand_core::RngCore;

    // 1128-bit test modulus: 141 signature bytes, 77-byte data block
    const SIGNATURE_BYTES: usize = 141;
    const DB_BYTES: usize = SIGNATURE_BYTES - HASH_BYTES;

    fn context() -> Montgomery<72> {
        Montgomery::new(rsa_modulus()).unwrap()
    }

    /// Produce a signature the way the trusted authority would.
    fn sign(
        mont: &Montgomery<72>,
        d: &BigInt<72>,
        checksum: &[u8; HASH_BYTES],
        salt: &[u8; HASH_BYTES],
    ) -> [u8; SIGNATURE_BYTES] {
        let mut hasher = Sha512::new();
        hasher.update(salt);
        hasher.update(checksum);
        hasher.update(&PSS_PAD);
        let h = hasher.finalize();

        let mut em = [0u8; SIGNATURE_BYTES];
        let ps_len = DB_BYTES - HASH_BYTES - PSS_PAD.len();
        em[ps_len..ps_len + PSS_PAD.len()].copy_from_slice(&PSS_PAD);
        em[ps_len + PSS_PAD.len()..DB_BYTES].copy_from_slice(salt);
        em[DB_BYTES..].copy_from_slice(&h);

        let (db, seed) = em.split_at_mut(DB_BYTES);
        let mut hasher = Sha512::new();
        xor_mgf1(&mut hasher, seed, db);

        let em = BigInt::<72>::from_be_bytes(&em);
        let s = mont.from_montgomery(&mont.power(&mont.to_montgomery(&em), d));

        let big_endian = s.swap_order();
        let mut signature = [0u8; SIGNATURE_BYTES];
        signature.copy_from_slice(&big_endian.as_bytes()[72 * DIGIT_BYTES - SIGNATURE_BYTES..]);
        signature
    }

    fn test_vector() -> (Montgomery<72>, [u8; HASH_BYTES], [u8; SIGNATURE_BYTES]) {
        let mont = context();
        let d = rsa_private_exponent();

        let mut checksum = [0u8; HASH_BYTES];
        checksum.copy_from_slice(&Sha512::digest(b"firmware image v2.1.7"));
        let mut salt = [0u8; HASH_BYTES];
        TestRng(0x5a17_5a17_5a17_5a17).fill_bytes(&mut salt);

        let signature = sign(&mont, &d, &checksum, &salt);
        (mont, checksum, signature)
    }

    #[test]
    fn valid_signature_verifies() {
        let (mont, checksum, signature) = test_vector();
        let e = BigInt::from(crate::E);
        assert!(verify_checksum(&mont, &e, &checksum, &signature));
    }

    #[test]
    fn any_flipped_signature_byte_rejects() {
        let (mont, checksum, signature) = test_vector();
        let e = BigInt::from(crate::E);

        for i in 0..signature.len() {
            let mut tampered = signature;
            tampered[i] ^= 0x01;
            assert!(
                !verify_checksum(&mont, &e, &checksum, &tampered),
                "flip at byte {} accepted",
                i,
            );
        }
    }

    #[test]
    fn any_flipped_checksum_byte_rejects() {
        let (mont, checksum, signature) = test_vector();
        let e = BigInt::from(crate::E);

        for i in 0..checksum.len() {
            let mut tampered = checksum;
            tampered[i] ^= 0x01;
            assert!(
                !verify_checksum(&mont, &e, &tampered, &signature),
                "flip at byte {} accepted",
                i,
            );
        }
    }

    #[test]
    fn malformed_signatures_reject() {
        let (mont, checksum, signature) = test_vector();
        let e = BigInt::from(crate::E);

        // wrong length
        assert!(!verify_checksum(&mont, &e, &checksum, &signature[..140]));
        assert!(!verify_checksum(&mont, &e, &checksum, &[0u8; 142]));

        // value not below the modulus
        let n = mont.modulus().clone().swap_order();
        let mut too_big = [0u8; SIGNATURE_BYTES];
        too_big.copy_from_slice(&n.as_bytes()[72 * DIGIT_BYTES - SIGNATURE_BYTES..]);
        assert!(!verify_checksum(&mont, &e, &checksum, &too_big));
    }

    #[test]
    fn narrow_modulus_rejects() {
        // 256 bits cannot carry 64-byte salt + hash + padding
        let mont = Montgomery::new(n256()).unwrap();
        let e = BigInt::from(crate::E);
        assert!(!verify_checksum(&mont, &e, &[0u8; HASH_BYTES], &[0u8; 32]));
    }

    #[test]
    fn verification_is_stateless() {
        let (mont, checksum, signature) = test_vector();
        let e = BigInt::from(crate::E);

        assert!(verify_checksum(&mont, &e, &checksum, &signature));
        assert!(verify_checksum(&mont, &e, &checksum, &signature));

        let mut tampered = signature;
        tampered[0] ^= 0xff;
        assert!(!verify_checksum(&mont, &e, &checksum, &tampered));
        assert!(!verify_checksum(&mont, &e, &checksum, &tampered));
        assert!(verify_checksum(&mont, &e, &checksum, &signature));
    }
}
