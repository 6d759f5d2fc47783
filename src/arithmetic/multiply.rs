use core::ops::Mul;

use crate::digit::{Digit, DoubleDigit, DIGIT_BITS};
use crate::BigInt;

impl<'a, const L: usize> Mul for &'a BigInt<L> {
    type Output = BigInt<L>;

    /// Schoolbook O(n²) multiplication, one double-width accumulator per
    /// digit column to absorb carries.
    ///
    /// The operands' combined logical length must fit the capacity.
    fn mul(self, other: Self) -> BigInt<L> {
        let (l_a, l_b) = (self.used(), other.used());
        assert!(l_a + l_b <= L, "product exceeds digit capacity");

        let mut product = BigInt::zero();
        if l_a == 0 || l_b == 0 {
            return product;
        }

        for i in 0..l_a {
            let mut carry: DoubleDigit = 0;
            for j in 0..l_b {
                let column = product.digits[i + j] as DoubleDigit
                    + self.digits[i] as DoubleDigit * other.digits[j] as DoubleDigit
                    + carry;
                product.digits[i + j] = column as Digit;
                carry = column >> DIGIT_BITS;
            }
            product.digits[i + l_b] = carry as Digit;
        }

        product.negative = self.negative != other.negative;
        product.normalize();
        product
    }
}
