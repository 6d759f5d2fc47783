//! PIN-obfuscated Diffie-Hellman pairing.
//!
//! Both roles run the same primitive: generate a PIN and a random
//! secret, obfuscate the secret with one AES-ECB block under a
//! PIN-derived key, exchange, and fold both secrets into
//! `g^(a·b) mod n` as two chained exponentiations. The shared value's
//! low bytes then wrap the device's stored application key for
//! transport.
//!
//! The PIN is massaged so every hex nibble reads as a decimal digit,
//! making it human-typeable on the peer.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, NewBlockCipher};
use aes::Aes128;
use rand_core::{CryptoRng, RngCore};
use sha1::{Digest, Sha1};
use zeroize::Zeroize;

use crate::{BigInt, Montgomery};

/// Width of the exchanged secrets.
pub const SECRET_BYTES: usize = 16;

/// Access to the device's persisted application AES key.
///
/// The store generates and rotates the key; this module only wraps and
/// unwraps it.
pub trait KeyStore {
    fn application_key(&self) -> [u8; 16];
}

/// Push every hex nibble above 9 up by 6, so the value prints as
/// decimal digits only.
///
/// The add carries into the next nibble; sweeping low to high lets a
/// later iteration clean up whatever the carry spoiled.
pub fn fix_pin(mut pin: u32) -> u32 {
    for nibble in 0..8 {
        if (pin >> (4 * nibble)) & 0xf > 9 {
            pin = pin.wrapping_add(6 << (4 * nibble));
        }
    }
    pin
}

/// AES key derived from a PIN: the first 16 bytes of SHA-1 over the
/// PIN's little-endian bytes.
fn pin_key(pin: u32) -> [u8; 16] {
    let digest = Sha1::digest(&pin.to_le_bytes());
    let mut key = [0u8; 16];
    key.copy_from_slice(&digest[..16]);
    key
}

fn encrypt_block(key: &[u8; 16], block: [u8; 16]) -> [u8; 16] {
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut block = GenericArray::from(block);
    cipher.encrypt_block(&mut block);
    block.into()
}

fn decrypt_block(key: &[u8; 16], block: [u8; 16]) -> [u8; 16] {
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut block = GenericArray::from(block);
    cipher.decrypt_block(&mut block);
    block.into()
}

/// Modulus of the built-in pairing group: `2^128 - 159`, the largest
/// 128-bit prime.
pub fn group_modulus<const L: usize>() -> BigInt<L> {
    let mut bytes = [0xff; SECRET_BYTES];
    bytes[SECRET_BYTES - 1] = 0x61;
    BigInt::from_be_bytes(&bytes)
}

/// Generator of the built-in pairing group.
pub fn group_generator<const L: usize>() -> BigInt<L> {
    BigInt::from(5)
}

/// One pairing attempt.
///
/// Created fresh per attempt with [`start`][Self::start], discarded
/// once a key is derived or the attempt is abandoned; its secrets are
/// scrubbed on drop. The group context is borrowed and shared between
/// both directions of the exchange.
pub struct DiffieHellmanSession<'n, const L: usize> {
    mont: &'n Montgomery<L>,
    generator: &'n BigInt<L>,
    pin: u32,
    local_secret: [u8; SECRET_BYTES],
    remote_secret: [u8; SECRET_BYTES],
    /// `g^(a·b)`, Montgomery form; zero until [`combine`][Self::combine].
    state: BigInt<L>,
    key: [u8; 16],
}

impl<'n, const L: usize> DiffieHellmanSession<'n, L> {
    /// Generate a fresh PIN and local secret from the platform RNG.
    pub fn start<R: RngCore + CryptoRng>(
        mont: &'n Montgomery<L>,
        generator: &'n BigInt<L>,
        rng: &mut R,
    ) -> Self {
        let pin = fix_pin(rng.next_u32());
        let mut local_secret = [0u8; SECRET_BYTES];
        rng.fill_bytes(&mut local_secret);
        Self {
            mont,
            generator,
            pin,
            local_secret,
            remote_secret: [0u8; SECRET_BYTES],
            state: BigInt::zero(),
            key: [0u8; 16],
        }
    }

    /// The decimal-digit PIN to display to the user.
    pub fn pin(&self) -> u32 {
        self.pin
    }

    /// The raw local secret.
    pub fn secret(&self) -> &[u8; SECRET_BYTES] {
        &self.local_secret
    }

    /// The local secret, one AES block under the PIN-derived key: safe
    /// to transmit without revealing the secret to anyone lacking the
    /// PIN.
    pub fn encoded_secret(&self) -> [u8; SECRET_BYTES] {
        encrypt_block(&pin_key(self.pin), self.local_secret)
    }

    /// Adopt the PIN the user read off the peer's display, replacing
    /// the locally generated one.
    pub fn enter_pin(&mut self, pin: u32) {
        self.pin = pin;
    }

    /// Take the peer's secret as raw bytes.
    pub fn receive_secret(&mut self, raw: &[u8; SECRET_BYTES]) {
        self.remote_secret = *raw;
    }

    /// Take the peer's secret in its PIN-obfuscated encoding.
    pub fn receive_encoded_secret(&mut self, encoded: &[u8; SECRET_BYTES]) {
        self.remote_secret = decrypt_block(&pin_key(self.pin), *encoded);
    }

    /// Fold both secrets into the shared value `g^(a·b) mod n`.
    ///
    /// Two chained exponentiations, not one: the exponents are raw
    /// secret bytes reinterpreted as big-endian integers and never
    /// merged. Chaining keeps the intermediate in Montgomery form.
    pub fn combine(&mut self) {
        let base = self.mont.to_montgomery(&self.mont.reduce(self.generator));
        let state = self
            .mont
            .power(&base, &BigInt::from_be_bytes(&self.local_secret));
        self.state = self
            .mont
            .power(&state, &BigInt::from_be_bytes(&self.remote_secret));
    }

    fn derive_key(&mut self) {
        let shared = self.mont.from_montgomery(&self.state);
        self.key = shared.low_bytes::<16>();
    }

    /// Wrap the stored application key under the shared value, yielding
    /// the block to transmit. Call after [`combine`][Self::combine].
    pub fn finish(&mut self, store: &impl KeyStore) -> [u8; 16] {
        self.derive_key();
        encrypt_block(&self.key, store.application_key())
    }

    /// Recover the peer's application key from its wrapped encoding.
    /// Call after [`combine`][Self::combine].
    pub fn unwrap_key(&mut self, encoded_key: &[u8; 16]) -> [u8; 16] {
        self.derive_key();
        decrypt_block(&self.key, *encoded_key)
    }
}

impl<'n, const L: usize> Drop for DiffieHellmanSession<'n, L> {
    fn drop(&mut self) {
        self.pin.zeroize();
        self.local_secret.zeroize();
        self.remote_secret.zeroize();
        self.state.zeroize();
        self.key.zeroize();
    }
}

/// Recover an application key directly from both raw secrets and the
/// wrapped key, skipping the exchange. For offline validation tooling
/// that already holds all three.
pub fn reverse<const L: usize>(
    mont: &Montgomery<L>,
    generator: &BigInt<L>,
    local_secret: &[u8; SECRET_BYTES],
    remote_secret: &[u8; SECRET_BYTES],
    encoded_key: &[u8; 16],
) -> [u8; 16] {
    let base = mont.to_montgomery(&mont.reduce(generator));
    let state = mont.power(&base, &BigInt::from_be_bytes(local_secret));
    let state = mont.power(&state, &BigInt::from_be_bytes(remote_secret));

    let mut shared = mont.from_montgomery(&state);
    let mut key = shared.low_bytes::<16>();
    let application_key = decrypt_block(&key, *encoded_key);

    shared.zeroize();
    key.zeroize();
    application_key
}
