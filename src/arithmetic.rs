//! Arithmetic on [`BigInt`][crate::BigInt], and the Montgomery engine on
//! top of it.
//!
//! The base operations (`add`, `subtract`, `shift`, `multiply`, `divide`)
//! are plain schoolbook algorithms over the fixed digit array; the
//! interesting machinery is in [`montgomery`], which trades divisions for
//! shifts via precomputed per-modulus constants, and in the two stepwise
//! state machines ([`Reduction`], [`PowerState`]) that let a cooperative
//! scheduler interleave long computations with time-critical work.

mod add;
mod subtract;
mod shift;
mod multiply;
mod divide;
mod montgomery;

pub use divide::Reduction;
pub use montgomery::{Montgomery, PowerState};
