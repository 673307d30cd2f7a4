//! The capability set every probability backing representation provides
//!
//! Implementations differ in how they store the value (native double,
//! decimal, rational, ...). Operands of a different backing are normalized
//! through the shared decimal form, `Self::from_decimal(other.to_decimal())`,
//! which can drop digits the receiving backing cannot hold.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt::Debug;

use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::error::{ProbabilityError, Result};
use crate::precision::{PrecisionContext, PrecisionRegistry};

/// A value in [0, 1] with tolerant comparison and closed arithmetic
///
/// Construction is range checked exactly. Arithmetic results are not, so
/// intermediate excursions outside [0, 1] stay observable through
/// [`ProbabilityNumber::is_valid`].
pub trait ProbabilityNumber: Clone + Debug + Send + Sync + 'static {
    /// Significant decimal digits this backing reproduces faithfully
    const MAX_PRECISION: u32;

    /// Process-wide precision context shared by every value of this backing
    fn registry() -> &'static PrecisionRegistry;

    /// Construct from a raw fraction, failing outside [0, 1]
    fn from_scalar(value: f64) -> Result<Self>;

    /// Construct from a decimal, failing outside [0, 1]
    ///
    /// Digits beyond what the backing holds are dropped silently.
    fn from_decimal(value: Decimal) -> Result<Self>;

    /// Render the value using an explicit context
    ///
    /// Fails with `Unrepresentable` when the value is too large for a decimal,
    /// or too small to keep `context.precision` significant digits.
    fn to_decimal_with(&self, context: &PrecisionContext) -> Result<Decimal>;

    /// Tolerant equality with zero
    fn is_zero(&self) -> bool;

    /// Tolerant equality with one
    fn is_one(&self) -> bool;

    /// Tolerant range check, the only way to detect arithmetic excursions
    fn is_valid(&self) -> bool;

    /// Sum of two values of this backing
    fn add_same(&self, other: &Self) -> Self;

    /// Difference of two values of this backing
    fn subtract_same(&self, other: &Self) -> Self;

    /// Product of two values of this backing
    fn multiply_same(&self, other: &Self) -> Self;

    /// Quotient of two values of this backing
    fn divide_same(&self, other: &Self) -> Result<Self>;

    /// Raise to an integer exponent
    fn pow(&self, exponent: i32) -> Self;

    /// Tolerant ordering of two values of this backing
    fn compare_same(&self, other: &Self) -> Ordering;

    /// Construct from a decimal that may be absent
    fn from_decimal_opt(value: Option<Decimal>) -> Result<Self> {
        value
            .ok_or(ProbabilityError::NullInput)
            .and_then(Self::from_decimal)
    }

    /// Currently committed process-wide context
    fn precision_context() -> PrecisionContext {
        Self::registry().current()
    }

    /// Render the value using the process-wide context
    fn to_decimal(&self) -> Result<Decimal> {
        self.to_decimal_with(&Self::precision_context())
    }

    /// Replace the process-wide context of this backing
    ///
    /// Takes effect for every later `to_decimal` call; decimals rendered
    /// earlier are unaffected.
    fn override_computation_precision_globally(context: PrecisionContext) -> Result<()> {
        Self::registry().override_with(context)
    }

    /// Convert any backing into this one
    fn normalize<P: ProbabilityNumber>(other: &P) -> Result<Self> {
        if let Some(same) = (other as &dyn Any).downcast_ref::<Self>() {
            return Ok(same.clone());
        }
        Self::from_decimal(other.to_decimal()?)
    }

    fn add<P: ProbabilityNumber>(&self, other: &P) -> Result<Self> {
        Ok(self.add_same(&Self::normalize(other)?))
    }

    fn subtract<P: ProbabilityNumber>(&self, other: &P) -> Result<Self> {
        Ok(self.subtract_same(&Self::normalize(other)?))
    }

    fn multiply<P: ProbabilityNumber>(&self, other: &P) -> Result<Self> {
        Ok(self.multiply_same(&Self::normalize(other)?))
    }

    /// Fails with `DivisionByZero` when the divisor is tolerantly zero
    fn divide<P: ProbabilityNumber>(&self, other: &P) -> Result<Self> {
        self.divide_same(&Self::normalize(other)?)
    }

    /// Raise to an arbitrary-precision exponent
    ///
    /// Only the low-order 32 bits of the exponent are used.
    fn pow_big(&self, exponent: &BigInt) -> Self {
        self.pow(low_order_i32(exponent))
    }

    fn equals<P: ProbabilityNumber>(&self, other: &P) -> Result<bool> {
        Ok(self.compare_to(other)? == Ordering::Equal)
    }

    fn compare_to<P: ProbabilityNumber>(&self, other: &P) -> Result<Ordering> {
        Ok(self.compare_same(&Self::normalize(other)?))
    }

    /// Whether the supplied values add up to one
    ///
    /// The receiver only selects the backing used for accumulation; its own
    /// value is not part of the sum.
    fn sums_to_one<'a, P, I>(&self, probabilities: I) -> Result<bool>
    where
        P: ProbabilityNumber,
        I: IntoIterator<Item = &'a P>,
    {
        Self::sum_is_one(probabilities)
    }

    /// Accumulate `probabilities` from zero and compare the sum with one
    fn sum_is_one<'a, P, I>(probabilities: I) -> Result<bool>
    where
        P: ProbabilityNumber,
        I: IntoIterator<Item = &'a P>,
    {
        let mut sum = Self::from_scalar(0.0)?;
        for probability in probabilities {
            sum = sum.add(probability)?;
        }
        Ok(sum.is_one())
    }
}

/// Low-order 32 bits of a two's complement integer, read as `i32`
pub fn low_order_i32(value: &BigInt) -> i32 {
    let bytes = value.to_signed_bytes_le();
    let fill = if value.sign() == num_bigint::Sign::Minus {
        0xFF
    } else {
        0x00
    };

    let mut low = [fill; 4];
    for (slot, byte) in low.iter_mut().zip(bytes.iter()) {
        *slot = *byte;
    }
    i32::from_le_bytes(low)
}
