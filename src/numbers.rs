//! The fixed-capacity integer type.

use core::cmp::Ordering;
use core::fmt;

use zeroize::Zeroize;

use crate::digit::{Digit, DIGIT_BITS, DIGIT_BYTES};

/// Sign-magnitude integer with `L` digit cells (L for length).
///
/// Internal representation is little-endian. The magnitude's logical
/// length is [`used`][Self::used]: the index + 1 of the highest non-zero
/// digit. Canonical zero has `used() == 0` and a clear sign flag; every
/// operation restores that invariant, so `negative` is never consulted
/// on a zero value.
///
/// In our "heapless" situation the capacity is part of the type: the
/// consumer picks `L` for the widest intermediate it will ever hold
/// (for Montgomery arithmetic, a full double product — see
/// [`Montgomery::new`][crate::Montgomery::new]). Exceeding the capacity
/// is a caller bug, not data-dependent, and asserts rather than
/// truncating silently.
///
/// All arithmetic borrows its operands and returns a fresh value, so an
/// output may freely coincide with an input at the call site; there is
/// no aliasing to get wrong.
#[derive(Clone, Zeroize)]
pub struct BigInt<const L: usize> {
    pub(crate) negative: bool,
    pub(crate) digits: [Digit; L],
}

impl<const L: usize> Default for BigInt<L> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const L: usize> From<Digit> for BigInt<L> {
    /// Fails for L = 0, bound not expressable.
    fn from(digit: Digit) -> Self {
        let mut x = Self::zero();
        x.digits[0] = digit;
        x
    }
}

// c'tors and such
impl<const L: usize> BigInt<L> {
    pub fn zero() -> Self {
        Self { negative: false, digits: [0; L] }
    }

    pub fn one() -> Self {
        Self::from(1)
    }

    /// Little-endian digits; the slice must fit the capacity.
    pub fn from_slice(slice: &[Digit]) -> Self {
        assert!(slice.len() <= L, "digit slice exceeds capacity");
        let mut x = Self::zero();
        x.digits[..slice.len()].copy_from_slice(slice);
        x
    }

    /// Big-endian bytes; the buffer must fit the capacity.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= L * DIGIT_BYTES, "byte buffer exceeds capacity");
        let mut x = Self::zero();
        for (i, &byte) in bytes.iter().rev().enumerate() {
            x.digits[i / DIGIT_BYTES] |= Digit::from(byte) << (8 * (i % DIGIT_BYTES));
        }
        x
    }

    /// The `N` least significant bytes of the magnitude, little-endian.
    ///
    /// Deliberately truncating: this is how protocol code projects a wide
    /// shared secret down to an AES key.
    pub fn low_bytes<const N: usize>(&self) -> [u8; N] {
        let mut bytes = [0u8; N];
        for (i, byte) in bytes.iter_mut().enumerate().take(L * DIGIT_BYTES) {
            *byte = (self.digits[i / DIGIT_BYTES] >> (8 * (i % DIGIT_BYTES))) as u8;
        }
        bytes
    }

    /// Reverse digit order and digit endianness, so that the raw byte view
    /// of the array reads as big-endian bytes of the full capacity.
    ///
    /// "On big endian this is a no-op. On little endian the bytes are
    /// swapped" — either way the view comes out big-endian.
    pub(crate) fn swap_order(mut self) -> Self {
        self.digits.reverse();
        for digit in self.digits.iter_mut() {
            *digit = digit.to_be();
        }
        self
    }

    /// Raw byte view of the digit array (`4·L` bytes). Big-endian bytes of
    /// the magnitude after [`swap_order`][Self::swap_order].
    pub(crate) fn as_bytes(&self) -> &[u8] {
        unsafe {
            core::slice::from_raw_parts(self.digits.as_ptr() as *const u8, L * DIGIT_BYTES)
        }
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        unsafe {
            core::slice::from_raw_parts_mut(self.digits.as_mut_ptr() as *mut u8, L * DIGIT_BYTES)
        }
    }
}

// inspection
impl<const L: usize> BigInt<L> {
    /// 0 if zero, else index + 1 of last non-zero digit.
    pub fn used(&self) -> usize {
        self.digits
            .iter()
            .enumerate()
            .rev()
            .find(|(_, &digit)| digit != 0)
            .map(|(i, _)| i + 1)
            .unwrap_or(0)
    }

    pub fn is_zero(&self) -> bool {
        self.used() == 0
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_odd(&self) -> bool {
        self.digits[0] & 1 != 0
    }

    /// Value of bit `i` of the magnitude; out-of-capacity bits read zero.
    pub fn bit(&self, i: usize) -> bool {
        if i >= L * DIGIT_BITS {
            return false;
        }
        (self.digits[i / DIGIT_BITS] >> (i % DIGIT_BITS)) & 1 != 0
    }

    /// Set bit `i` of the magnitude.
    pub fn set_bit(&mut self, i: usize) {
        assert!(i < L * DIGIT_BITS, "bit index exceeds capacity");
        self.digits[i / DIGIT_BITS] |= 1 << (i % DIGIT_BITS);
    }

    /// Index of the most significant set bit, `None` when zero.
    pub fn msb(&self) -> Option<usize> {
        let l = self.used();
        if l == 0 {
            return None;
        }
        let top = self.digits[l - 1];
        Some((l - 1) * DIGIT_BITS + (DIGIT_BITS - 1 - top.leading_zeros() as usize))
    }

    /// Index of the least significant set bit, `None` when zero.
    pub fn lsb(&self) -> Option<usize> {
        self.digits
            .iter()
            .enumerate()
            .find(|(_, &digit)| digit != 0)
            .map(|(i, &digit)| i * DIGIT_BITS + digit.trailing_zeros() as usize)
    }

    /// Bit length of the magnitude (0 for zero).
    pub fn bits(&self) -> usize {
        self.msb().map(|i| i + 1).unwrap_or(0)
    }

    /// Keep the low `bits` bits of the magnitude, clear the rest.
    ///
    /// This is reduction modulo `2^bits`, used for the mod-R legs of
    /// Montgomery setup and reduction.
    pub(crate) fn truncate(&mut self, bits: usize) {
        let n_digits = bits / DIGIT_BITS;
        if n_digits >= L {
            return;
        }
        let n_bits = bits % DIGIT_BITS;
        if n_bits == 0 {
            for digit in self.digits[n_digits..].iter_mut() {
                *digit = 0;
            }
        } else {
            self.digits[n_digits] &= (1 << n_bits) - 1;
            for digit in self.digits[n_digits + 1..].iter_mut() {
                *digit = 0;
            }
        }
        self.normalize();
    }

    /// Restore the canonical-zero invariant after an operation.
    pub(crate) fn normalize(&mut self) {
        if self.is_zero() {
            self.negative = false;
        }
    }

    /// Three-way compare of magnitudes, signs ignored.
    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        let (l_a, l_b) = (self.used(), other.used());
        match l_a.cmp(&l_b) {
            Ordering::Equal => {}
            not_equal => return not_equal,
        }
        // little-endian storage, so compare from the top digit down
        for i in (0..l_a).rev() {
            match self.digits[i].cmp(&other.digits[i]) {
                Ordering::Equal => (),
                not_equal => return not_equal,
            }
        }
        Ordering::Equal
    }
}

impl<const L: usize> Ord for BigInt<L> {
    /// Magnitude-then-sign; the canonical-zero invariant makes equal
    /// zeros compare equal without a special case.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl<const L: usize> PartialOrd for BigInt<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const L: usize> PartialEq for BigInt<L> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<const L: usize> Eq for BigInt<L> {}

#[cfg(not(feature = "hex-debug"))]
impl<const L: usize> fmt::Debug for BigInt<L> {
    /// Big-endian bytes of the full capacity, sign first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        let big_endian = self.clone().swap_order();
        fmt::Debug::fmt(big_endian.as_bytes(), f)
    }
}

#[cfg(feature = "hex-debug")]
impl<const L: usize> fmt::Debug for BigInt<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        let big_endian = self.clone().swap_order();
        write!(f, "{}", delog::hex_str!(big_endian.as_bytes()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn debug() {
        let x = BigInt::<2>::from_slice(&[0x76543210, 0xFEDCBA98]);
        assert_eq!(format!("{:X?}", x), "[FE, DC, BA, 98, 76, 54, 32, 10]");
    }

    #[test]
    fn used() {
        let x = BigInt::<6>::from_slice(&[0, 1, 0, 2, 0, 0]);
        assert_eq!(x.used(), 4);

        let x = BigInt::<3>::from_slice(&[0, 0, 0]);
        assert_eq!(x.used(), 0);
        assert!(x.is_zero());
    }

    #[test]
    fn byte_round_trip() {
        let x = BigInt::<4>::from_be_bytes(&[0x12, 0x34, 0x56, 0x78, 0x9a]);
        assert_eq!(x.digits[0], 0x3456789a);
        assert_eq!(x.digits[1], 0x12);
        assert_eq!(x.low_bytes::<5>(), [0x9a, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(x.low_bytes::<2>(), [0x9a, 0x78]);
    }

    #[test]
    fn bit_indices() {
        let mut x = BigInt::<3>::zero();
        assert_eq!(x.msb(), None);
        assert_eq!(x.lsb(), None);

        x.set_bit(33);
        x.set_bit(7);
        assert_eq!(x.msb(), Some(33));
        assert_eq!(x.lsb(), Some(7));
        assert_eq!(x.bits(), 34);
        assert!(x.bit(33) && x.bit(7) && !x.bit(8));
    }

    #[test]
    fn truncate() {
        let mut x = BigInt::<3>::from_slice(&[0xffff_ffff, 0xffff_ffff, 0xffff_ffff]);
        x.truncate(33);
        assert_eq!(x.digits, [0xffff_ffff, 1, 0]);
    }

    #[test]
    fn compare() {
        let two = BigInt::<2>::from(2);
        let three = BigInt::<2>::from(3);
        let minus_three = -three.clone();
        assert!(two < three);
        assert!(minus_three < two);
        assert!(-two.clone() > minus_three);
        assert_eq!(BigInt::<2>::zero(), -BigInt::<2>::zero());
    }
}
