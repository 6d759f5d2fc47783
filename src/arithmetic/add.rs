use core::cmp::Ordering;
use core::ops::{Add, Neg};

use crate::digit::{Digit, DoubleDigit, DIGIT_BITS};
use crate::BigInt;

impl<const L: usize> BigInt<L> {
    /// Magnitude addition, signs ignored.
    ///
    /// The sum must fit the digit capacity.
    pub fn unsigned_add(&self, other: &Self) -> Self {
        let mut sum = Self::zero();
        let mut carry: DoubleDigit = 0;
        for i in 0..L {
            carry += self.digits[i] as DoubleDigit + other.digits[i] as DoubleDigit;
            sum.digits[i] = carry as Digit;
            carry >>= DIGIT_BITS;
        }
        assert!(carry == 0, "sum exceeds digit capacity");
        sum
    }
}

impl<'a, const L: usize> Add for &'a BigInt<L> {
    type Output = BigInt<L>;

    /// Signed addition: same signs add magnitudes, mixed signs subtract
    /// the smaller magnitude from the larger and take its sign.
    fn add(self, other: Self) -> BigInt<L> {
        let mut sum = if self.negative == other.negative {
            let mut sum = self.unsigned_add(other);
            sum.negative = self.negative;
            sum
        } else {
            match self.cmp_magnitude(other) {
                Ordering::Less => {
                    let mut difference = other.unsigned_sub(self);
                    difference.negative = other.negative;
                    difference
                }
                _ => {
                    let mut difference = self.unsigned_sub(other);
                    difference.negative = self.negative;
                    difference
                }
            }
        };
        sum.normalize();
        sum
    }
}

impl<const L: usize> Neg for BigInt<L> {
    type Output = BigInt<L>;

    fn neg(mut self) -> BigInt<L> {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
        self
    }
}
