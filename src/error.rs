/// There is but one – failure 🤪.
///
/// Raised for the preconditions adversarial input can reach: an even or
/// undersized modulus, a modulus too wide for the digit capacity, a
/// missing modular inverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Error;

/// [`Error`] or success.
pub type Result<T> = core::result::Result<T, Error>;
