use core::ops::{Shl, Shr};

use crate::digit::DIGIT_BITS;
use crate::BigInt;

impl<const L: usize> BigInt<L> {
    /// Left shift ("left" means "higher number").
    ///
    /// The boolean reports whether set bits were pushed off the top —
    /// callers that must detect precision loss branch on it; callers that
    /// know the result fits use the `<<` operator and drop it.
    pub fn shl(&self, bits: usize) -> (Self, bool) {
        let lost = !self.is_zero() && self.bits() + bits > L * DIGIT_BITS;

        let mut shifted = Self::zero();
        shifted.negative = self.negative;

        let n_digits = bits / DIGIT_BITS;
        if n_digits < L {
            for i in (0..L - n_digits).rev() {
                shifted.digits[i + n_digits] = self.digits[i];
            }
            let n_bits = bits % DIGIT_BITS;
            if n_bits > 0 {
                let mut carry = 0;
                for digit in shifted.digits[n_digits..].iter_mut() {
                    let new_carry = *digit >> (DIGIT_BITS - n_bits);
                    *digit = (*digit << n_bits) | carry;
                    carry = new_carry;
                }
            }
        }
        shifted.normalize();
        (shifted, lost)
    }

    /// Right shift ("right" means "lower number").
    ///
    /// The boolean reports whether set bits were discarded at the bottom
    /// (used by the RSA-PSS path to know the stripped padding was clean).
    pub fn shr(&self, bits: usize) -> (Self, bool) {
        let lost = match self.lsb() {
            Some(lsb) => lsb < bits,
            None => false,
        };

        let mut shifted = Self::zero();
        shifted.negative = self.negative;

        let n_digits = bits / DIGIT_BITS;
        if n_digits < L {
            for i in n_digits..L {
                shifted.digits[i - n_digits] = self.digits[i];
            }
            let n_bits = bits % DIGIT_BITS;
            if n_bits > 0 {
                let mut borrow = 0;
                for digit in shifted.digits.iter_mut().rev() {
                    let new_borrow = *digit << (DIGIT_BITS - n_bits);
                    *digit = (*digit >> n_bits) | borrow;
                    borrow = new_borrow;
                }
            }
        }
        shifted.normalize();
        (shifted, lost)
    }
}

impl<const L: usize> Shl<usize> for &BigInt<L> {
    type Output = BigInt<L>;

    #[inline]
    fn shl(self, bits: usize) -> BigInt<L> {
        BigInt::shl(self, bits).0
    }
}

impl<const L: usize> Shr<usize> for &BigInt<L> {
    type Output = BigInt<L>;

    #[inline]
    fn shr(self, bits: usize) -> BigInt<L> {
        BigInt::shr(self, bits).0
    }
}

#[cfg(test)]
mod test {
    use crate::BigInt;

    type Bn = BigInt<4>;

    #[test]
    fn crosses_digit_boundaries() {
        let x = Bn::from(0x8000_0001);
        let (shifted, lost) = x.shl(33);
        assert!(!lost);
        assert_eq!(shifted.digits, [0, 2, 3, 0]);

        let (back, lost) = shifted.shr(33);
        assert!(!lost);
        assert_eq!(back, x);
    }

    #[test]
    fn reports_lost_bits() {
        let x = Bn::from(0b101);
        let (_, lost) = x.shr(1);
        assert!(lost);
        let (_, lost) = x.shr(3);
        assert!(lost);

        let top_heavy = Bn::from_slice(&[0, 0, 0, 0x8000_0000]);
        let (shifted, lost) = top_heavy.shl(1);
        assert!(lost);
        assert!(shifted.is_zero());
    }

    #[test]
    fn shift_out_everything() {
        let x = Bn::from_slice(&[1, 2, 3, 4]);
        let (shifted, lost) = x.shr(4 * 32);
        assert!(lost);
        assert!(shifted.is_zero());
        assert!(!shifted.is_negative());
    }
}
