use core::cmp::Ordering;
use core::ops::{Div, Rem};

use crate::{BigInt, Error, Result};

impl<const L: usize> BigInt<L> {
    /// Quotient and remainder in one pass, by binary long division.
    ///
    /// Runs one compare-and-subtract per numerator bit, which is exactly
    /// the shape the stepwise [`Reduction`] resumes from. Operands must
    /// be non-negative, the divisor non-zero.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        debug_assert!(!self.negative && !divisor.negative);
        assert!(!divisor.is_zero(), "division by zero");

        let mut quotient = Self::zero();
        let mut remainder = Self::zero();
        let msb = match self.msb() {
            Some(msb) => msb,
            None => return (quotient, remainder),
        };

        for i in (0..=msb).rev() {
            let (shifted, lost) = remainder.shl(1);
            debug_assert!(!lost);
            remainder = shifted;
            if self.bit(i) {
                remainder.digits[0] |= 1;
            }
            if remainder.cmp_magnitude(divisor) != Ordering::Less {
                remainder = remainder.unsigned_sub(divisor);
                quotient.set_bit(i);
            }
        }
        (quotient, remainder)
    }

    /// Inverse of `self` modulo `modulus`, by the extended Euclidean
    /// algorithm over the signed type.
    ///
    /// `Err` when no inverse exists (operands not coprime).
    pub fn mod_inverse(&self, modulus: &Self) -> Result<Self> {
        debug_assert!(!self.negative && !modulus.negative);

        let mut old_r = modulus.clone();
        let mut r = self.div_rem(modulus).1;
        // Bézout coefficients of `self`; these go negative, the remainders never do.
        let mut old_s = Self::zero();
        let mut s = Self::one();

        while !r.is_zero() {
            let (q, next_r) = old_r.div_rem(&r);
            old_r = r;
            r = next_r;

            let next_s = &old_s - &(&q * &s);
            old_s = s;
            s = next_s;
        }

        if old_r != Self::one() {
            return Err(Error);
        }
        let inverse = if old_s.is_negative() {
            &old_s + modulus
        } else {
            old_s
        };
        Ok(inverse.div_rem(modulus).1)
    }
}

//
// Operator sugar
//

impl<'a, const L: usize> Div for &'a BigInt<L> {
    type Output = BigInt<L>;
    fn div(self, divisor: Self) -> BigInt<L> {
        self.div_rem(divisor).0
    }
}

impl<'a, const L: usize> Rem for &'a BigInt<L> {
    type Output = BigInt<L>;
    fn rem(self, divisor: Self) -> BigInt<L> {
        self.div_rem(divisor).1
    }
}

/// A long division suspended between scheduler ticks.
///
/// Each [`step`][Self::step] consumes one numerator bit and returns
/// whether work remains, so reducing even a capacity-wide numerator never
/// stalls the cooperative scheduler. Cancellation is dropping the value;
/// there is nothing to release.
pub struct Reduction<'n, const L: usize> {
    numerator: BigInt<L>,
    divisor: &'n BigInt<L>,
    remainder: BigInt<L>,
    /// Next numerator bit to consume; `None` once done.
    bit: Option<usize>,
}

impl<'n, const L: usize> Reduction<'n, L> {
    pub fn new(numerator: BigInt<L>, divisor: &'n BigInt<L>) -> Self {
        debug_assert!(!numerator.negative && !divisor.negative);
        assert!(!divisor.is_zero(), "division by zero");
        let bit = numerator.msb();
        Self { numerator, divisor, remainder: BigInt::zero(), bit }
    }

    /// Advance one numerator bit. Returns whether work remains.
    pub fn step(&mut self) -> bool {
        if let Some(i) = self.bit {
            let (shifted, lost) = self.remainder.shl(1);
            debug_assert!(!lost);
            self.remainder = shifted;
            if self.numerator.bit(i) {
                self.remainder.digits[0] |= 1;
            }
            if self.remainder.cmp_magnitude(self.divisor) != Ordering::Less {
                self.remainder = self.remainder.unsigned_sub(self.divisor);
            }
            self.bit = if i == 0 { None } else { Some(i - 1) };
        }
        self.bit.is_some()
    }

    pub fn is_done(&self) -> bool {
        self.bit.is_none()
    }

    /// The remainder; meaningful once [`is_done`][Self::is_done].
    pub fn remainder(&self) -> &BigInt<L> {
        &self.remainder
    }
}
