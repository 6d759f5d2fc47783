use core::ops::Sub;

use crate::digit::{Digit, SignedDoubleDigit, DIGIT_BITS};
use crate::BigInt;

impl<const L: usize> BigInt<L> {
    /// Magnitude subtraction, signs ignored.
    ///
    /// The caller must have established `|self| ≥ |other|` (cheap via
    /// [`cmp_magnitude`][Self::cmp_magnitude]).
    pub fn unsigned_sub(&self, other: &Self) -> Self {
        debug_assert!(self.cmp_magnitude(other) != core::cmp::Ordering::Less);
        let mut difference = Self::zero();
        let mut borrow: SignedDoubleDigit = 0;
        for i in 0..L {
            let mut digit =
                self.digits[i] as SignedDoubleDigit - other.digits[i] as SignedDoubleDigit - borrow;
            if digit < 0 {
                digit += (1 as SignedDoubleDigit) << DIGIT_BITS;
                borrow = 1;
            } else {
                borrow = 0;
            }
            difference.digits[i] = digit as Digit;
        }
        debug_assert!(borrow == 0);
        difference
    }
}

impl<'a, const L: usize> Sub for &'a BigInt<L> {
    type Output = BigInt<L>;

    fn sub(self, other: Self) -> BigInt<L> {
        let mut negated = other.clone();
        if !negated.is_zero() {
            negated.negative = !negated.negative;
        }
        self + &negated
    }
}
