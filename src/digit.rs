/// A word of the fixed-capacity integers.
///
/// The paired radio targets are 32-bit Cortex-M parts, so the digit is
/// fixed at `u32`; products and carries are absorbed by a `u64`
/// accumulator, borrows by an `i64`.
pub type Digit = u32;

/// Unsigned type with twice as many bits as [`Digit`].
pub(crate) type DoubleDigit = u64;
/// Signed type with twice as many bits as [`Digit`].
pub(crate) type SignedDoubleDigit = i64;

/// Bits per digit, as a `usize` for index arithmetic.
pub(crate) const DIGIT_BITS: usize = Digit::BITS as usize;
/// Bytes per digit.
pub(crate) const DIGIT_BYTES: usize = DIGIT_BITS / 8;
