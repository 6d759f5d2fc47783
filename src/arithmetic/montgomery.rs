//! Modular arithmetic in the Montgomery representation.
//!
//! For an odd modulus `n` of bit length `s`, let `R = 2^s`. The
//! Montgomery form of `x` is `x·R mod n`; in this form a modular
//! multiplication costs two big multiplications and one reduction
//! ("REDC") consisting only of shifts, adds and a truncated multiply —
//! no long division anywhere in the hot path.
//!
//! Source: [Modular Multiplication Without Trial Division (1985)][montgomery]
//!
//! [montgomery]: https://doi.org/10.1090/S0025-5718-1985-0777282-X

use core::cmp::Ordering;

use zeroize::Zeroize;

use crate::digit::DIGIT_BITS;
use crate::{BigInt, Error, Result};

/// Inverse of an odd number modulo a power of two: $x^{-1}\text{ mod }2^k$.
///
/// Newton–Hensel iteration $y \leftarrow y(2 - xy)$, doubling the valid
/// precision each round, so $\mathcal{O}(\log k)$ big multiplications.
///
/// Source: Fig. 1 from
/// [GCD-Free Algorithms for Computing Modular Inverses (2003)][joye-paillier]
///
/// Note that this source is highly confusing! What they mean to say is to
/// iterate in $\mathbb{Z}/2^k$ and truncate; cf. [Crypto StackExchange][cse].
///
/// [joye-paillier]: https://api.semanticscholar.org/CorpusID:17736455
/// [cse]: https://crypto.stackexchange.com/a/47496
fn inverse_mod_power_of_two<const L: usize>(x: &BigInt<L>, k: usize) -> BigInt<L> {
    debug_assert!(x.is_odd());

    let two = BigInt::from(2);
    let mut y = BigInt::one();
    let mut precision = 1;
    while precision < k {
        precision = (2 * precision).min(k);

        let mut truncated_x = x.clone();
        truncated_x.truncate(precision);
        let mut t = &truncated_x * &y;
        t.truncate(precision);

        // (2 - t) mod 2^precision; t is odd, so t = 1 means converged
        let correction = if t.cmp_magnitude(&two) == Ordering::Greater {
            let modulus = &BigInt::one() << precision;
            modulus.unsigned_add(&two).unsigned_sub(&t)
        } else {
            two.unsigned_sub(&t)
        };

        y = &y * &correction;
        y.truncate(precision);
    }
    y
}

/// Precomputed context for arithmetic modulo a fixed odd `n`.
///
/// Constructing one costs an inversion and `bits(n)` doublings;
/// everything after that is division-free. The capacity `L` must fit a
/// full double product, `2·bits(n) + 1` bits and two full digit spans —
/// [`new`][Self::new] rejects a modulus the capacity cannot serve.
#[derive(Clone)]
pub struct Montgomery<const L: usize> {
    n: BigInt<L>,
    /// R² mod n, the multiplier that moves a value into Montgomery form.
    rr: BigInt<L>,
    /// n⁻¹ mod R, negated on use inside [`redc`][Self::redc].
    minv: BigInt<L>,
    /// R mod n: the Montgomery form of 1, and the neutral accumulator.
    one: BigInt<L>,
    shift: usize,
}

impl<const L: usize> Montgomery<L> {
    /// Precompute the context for modulus `n`.
    ///
    /// Errors when `n` is even or smaller than 3, or when the capacity
    /// cannot hold the intermediates of [`redc`][Self::redc].
    pub fn new(n: BigInt<L>) -> Result<Self> {
        if !n.is_odd() || n.bits() < 2 || n.is_negative() {
            return Err(Error);
        }
        let shift = n.bits();
        let span = (shift + DIGIT_BITS - 1) / DIGIT_BITS;
        if 2 * span > L || 2 * shift + 1 > L * DIGIT_BITS {
            return Err(Error);
        }

        // R mod n = R - n, as bits(n) = s pins n into [R/2, R)
        let r = &BigInt::one() << shift;
        let one = r.unsigned_sub(&n);

        // R² mod n by s modular doublings of R mod n
        let mut rr = one.clone();
        for _ in 0..shift {
            let (doubled, lost) = rr.shl(1);
            debug_assert!(!lost);
            rr = doubled;
            if rr.cmp_magnitude(&n) != Ordering::Less {
                rr = rr.unsigned_sub(&n);
            }
        }

        let minv = inverse_mod_power_of_two(&n, shift);

        Ok(Self { n, rr, minv, one, shift })
    }

    pub fn modulus(&self) -> &BigInt<L> {
        &self.n
    }

    /// Bit length of the modulus.
    pub fn bits(&self) -> usize {
        self.shift
    }

    /// `x mod n` for an arbitrary non-negative `x`, by long division.
    ///
    /// This is the one entry point that does divide; use it to bring
    /// foreign values (wire input, generators) into range once, then stay
    /// in Montgomery form.
    pub fn reduce(&self, x: &BigInt<L>) -> BigInt<L> {
        x.div_rem(&self.n).1
    }

    /// Montgomery reduction: `t·R⁻¹ mod n` for `t < R·n`.
    ///
    /// `m = t·(-n⁻¹) mod R` makes `t + m·n` divisible by `R`; the
    /// quotient lands below `2n` and one conditional subtract finishes.
    fn redc(&self, t: BigInt<L>) -> BigInt<L> {
        debug_assert!(!t.is_negative());

        let mut m = t.clone();
        m.truncate(self.shift);
        m = &m * &self.minv;
        m.truncate(self.shift);
        if !m.is_zero() {
            let r = &BigInt::one() << self.shift;
            m = r.unsigned_sub(&m);
        }

        let folded = t.unsigned_add(&(&m * &self.n));
        let (mut reduced, lost) = folded.shr(self.shift);
        debug_assert!(!lost);
        if reduced.cmp_magnitude(&self.n) != Ordering::Less {
            reduced = reduced.unsigned_sub(&self.n);
        }
        reduced
    }

    /// Montgomery form `x·R mod n` of `x < n`.
    pub fn to_montgomery(&self, x: &BigInt<L>) -> BigInt<L> {
        debug_assert!(x.cmp_magnitude(&self.n) == Ordering::Less);
        self.redc(x * &self.rr)
    }

    /// Plain residue of a Montgomery-form value.
    pub fn from_montgomery(&self, x: &BigInt<L>) -> BigInt<L> {
        self.redc(x.clone())
    }

    /// Product of two Montgomery-form values, in Montgomery form.
    pub fn multiply(&self, a: &BigInt<L>, b: &BigInt<L>) -> BigInt<L> {
        self.redc(a * b)
    }

    /// `base^exponent`, both ends in Montgomery form.
    ///
    /// Runs a [`PowerState`] to completion; callers that must not stall a
    /// scheduler drive the state themselves instead.
    pub fn power(&self, base: &BigInt<L>, exponent: &BigInt<L>) -> BigInt<L> {
        let mut state = PowerState::new(self, base.clone(), exponent.clone());
        while state.step() {}
        state.result().clone()
    }
}

/// A modular exponentiation suspended between scheduler ticks.
///
/// Left-to-right binary square-and-multiply, one exponent bit per
/// [`step`][Self::step]: a step is one or two Montgomery multiplications,
/// bounded work regardless of how wide the operands are. Holds the borrow
/// of its context for its whole life, and scrubs its secrets on drop, so
/// an abandoned exchange leaks nothing.
pub struct PowerState<'n, const L: usize> {
    mont: &'n Montgomery<L>,
    exponent: BigInt<L>,
    /// Montgomery form.
    base: BigInt<L>,
    accumulator: BigInt<L>,
    /// Next exponent bit to consume; `None` once done.
    bit: Option<usize>,
}

impl<'n, const L: usize> PowerState<'n, L> {
    /// `base` in Montgomery form; the exponent is plain.
    pub fn new(mont: &'n Montgomery<L>, base: BigInt<L>, exponent: BigInt<L>) -> Self {
        let bit = exponent.msb();
        Self { mont, exponent, base, accumulator: mont.one.clone(), bit }
    }

    /// Advance one exponent bit. Returns whether work remains.
    pub fn step(&mut self) -> bool {
        if let Some(i) = self.bit {
            self.accumulator = self.mont.multiply(&self.accumulator, &self.accumulator);
            if self.exponent.bit(i) {
                self.accumulator = self.mont.multiply(&self.accumulator, &self.base);
            }
            self.bit = if i == 0 { None } else { Some(i - 1) };
        }
        self.bit.is_some()
    }

    pub fn is_done(&self) -> bool {
        self.bit.is_none()
    }

    /// The power, in Montgomery form; meaningful once
    /// [`is_done`][Self::is_done]. A zero exponent yields the Montgomery
    /// form of 1.
    pub fn result(&self) -> &BigInt<L> {
        &self.accumulator
    }
}

impl<'n, const L: usize> Drop for PowerState<'n, L> {
    fn drop(&mut self) {
        self.exponent.zeroize();
        self.base.zeroize();
        self.accumulator.zeroize();
    }
}
