//! # Fixed-Point Math
//!
//! Checked arithmetic over `u128` amounts and 1e18-scaled mantissas.
//!
//! Every operation returns `Result<_, MathError>`; nothing wraps or
//! saturates. Callers propagate with `?` and `MathError` converts into
//! [`crate::errors::MarketError`].

/// Scale of an [`Exp`] mantissa: `1e18` represents `1.0`.
pub const EXP_SCALE: u128 = 1_000_000_000_000_000_000;

/// Failure of a single arithmetic step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MathError {
    Overflow,
    Underflow,
    DivideByZero,
}

pub fn add(a: u128, b: u128) -> Result<u128, MathError> {
    a.checked_add(b).ok_or(MathError::Overflow)
}

pub fn sub(a: u128, b: u128) -> Result<u128, MathError> {
    a.checked_sub(b).ok_or(MathError::Underflow)
}

pub fn mul(a: u128, b: u128) -> Result<u128, MathError> {
    a.checked_mul(b).ok_or(MathError::Overflow)
}

pub fn div(a: u128, b: u128) -> Result<u128, MathError> {
    a.checked_div(b).ok_or(MathError::DivideByZero)
}

/// `a * b / denominator`, truncating.
///
/// The denominator is checked before the product so a zero denominator is
/// always reported as `DivideByZero`, never masked by an overflow.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128, MathError> {
    if denominator == 0 {
        return Err(MathError::DivideByZero);
    }
    div(mul(a, b)?, denominator)
}

/// A fixed-point number with 18 decimals.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Exp {
    pub mantissa: u128,
}

impl Exp {
    pub const fn new(mantissa: u128) -> Self {
        Exp { mantissa }
    }

    /// Integer part, discarding the fraction.
    pub fn truncate(self) -> u128 {
        self.mantissa / EXP_SCALE
    }

    pub fn mul_scalar(self, scalar: u128) -> Result<Exp, MathError> {
        Ok(Exp::new(mul(self.mantissa, scalar)?))
    }

    /// `truncate(self * scalar)`
    pub fn mul_scalar_truncate(self, scalar: u128) -> Result<u128, MathError> {
        Ok(self.mul_scalar(scalar)?.truncate())
    }

    /// `truncate(self * scalar) + addend`
    pub fn mul_scalar_truncate_add(self, scalar: u128, addend: u128) -> Result<u128, MathError> {
        add(self.mul_scalar_truncate(scalar)?, addend)
    }
}
