//! DoubleProbability - probability backed by a native `f64`
//!
//! An IEEE 754 double carries about 15.95 significant decimal digits, so
//! decimal rendering is capped at 15 digits. Arithmetic is plain `f64`
//! arithmetic; the tolerant comparison is the only thing absorbing the
//! rounding error it produces.
//!
//! `Decimal` keeps at most 28 fractional digits, so very small values cannot
//! be rendered at full precision. Rendering those fails with
//! [`ProbabilityError::Unrepresentable`] rather than returning a truncated
//! decimal.

use std::cmp::Ordering;

use probable_common::{
    tolerance, PrecisionContext, PrecisionRegistry, ProbabilityError, ProbabilityNumber, Result,
    DOUBLE_MAX_PRECISION,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Fractional digits a `Decimal` can hold
const DECIMAL_MAX_SCALE: i32 = 28;

/// Process-wide precision context of double-backed probabilities
static DOUBLE_PRECISION: PrecisionRegistry =
    PrecisionRegistry::new(DOUBLE_MAX_PRECISION, PrecisionContext::DOUBLE);

/// Immutable probability value backed by `f64`
///
/// Direct construction rejects anything outside [0, 1]. Results of
/// arithmetic are kept as computed, even when they leave the range, and
/// can be inspected with [`ProbabilityNumber::is_valid`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DoubleProbability {
    value: f64,
}

impl DoubleProbability {
    /// Probability zero
    pub const ZERO: DoubleProbability = DoubleProbability { value: 0.0 };

    /// Probability one
    pub const ONE: DoubleProbability = DoubleProbability { value: 1.0 };

    /// Construct from a raw fraction, failing outside [0, 1]
    pub fn new(value: f64) -> Result<Self> {
        // Also rejects NaN
        if !(0.0..=1.0).contains(&value) {
            return Err(ProbabilityError::out_of_range(value));
        }
        Ok(Self { value })
    }

    /// Arithmetic results skip range validation
    #[inline]
    fn unchecked(value: f64) -> Self {
        Self { value }
    }

    /// The raw backing scalar
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Probability of the complementary event, `1 - p`
    #[inline]
    pub fn complement(&self) -> Self {
        Self::unchecked(1.0 - self.value)
    }
}

impl ProbabilityNumber for DoubleProbability {
    const MAX_PRECISION: u32 = DOUBLE_MAX_PRECISION;

    fn registry() -> &'static PrecisionRegistry {
        &DOUBLE_PRECISION
    }

    fn from_scalar(value: f64) -> Result<Self> {
        Self::new(value)
    }

    fn from_decimal(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(ProbabilityError::out_of_range(value));
        }
        let scalar = value
            .to_f64()
            .ok_or_else(|| ProbabilityError::out_of_range(value))?;
        Ok(Self { value: scalar })
    }

    fn to_decimal_with(&self, context: &PrecisionContext) -> Result<Decimal> {
        let unrepresentable = || ProbabilityError::Unrepresentable {
            value: format!("{:e}", self.value),
        };

        // Rounding needs one digit past the requested precision
        if self.value != 0.0 && retained_digits(self.value) <= context.precision as i32 {
            trace!(
                value = self.value,
                precision = context.precision,
                "Value too small for decimal rendering"
            );
            return Err(unrepresentable());
        }

        let exact = Decimal::from_f64_retain(self.value).ok_or_else(unrepresentable)?;
        let rounded = exact
            .round_sf_with_strategy(context.precision, context.rounding.strategy())
            .ok_or_else(unrepresentable)?;
        Ok(rounded.normalize())
    }

    fn is_zero(&self) -> bool {
        tolerance::approx_eq(self.value, 0.0)
    }

    fn is_one(&self) -> bool {
        tolerance::approx_eq(self.value, 1.0)
    }

    fn is_valid(&self) -> bool {
        tolerance::compare(self.value, 0.0) != Ordering::Less
            && tolerance::compare(self.value, 1.0) != Ordering::Greater
    }

    fn add_same(&self, other: &Self) -> Self {
        Self::unchecked(self.value + other.value)
    }

    fn subtract_same(&self, other: &Self) -> Self {
        Self::unchecked(self.value - other.value)
    }

    fn multiply_same(&self, other: &Self) -> Self {
        Self::unchecked(self.value * other.value)
    }

    fn divide_same(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            trace!(dividend = self.value, divisor = other.value, "Rejected division by zero");
            return Err(ProbabilityError::DivisionByZero);
        }
        Ok(Self::unchecked(self.value / other.value))
    }

    fn pow(&self, exponent: i32) -> Self {
        Self::unchecked(self.value.powi(exponent))
    }

    fn compare_same(&self, other: &Self) -> Ordering {
        tolerance::compare(self.value, other.value)
    }
}

/// Significant digits left for a nonzero magnitude once the fraction is
/// cut at [`DECIMAL_MAX_SCALE`]
fn retained_digits(value: f64) -> i32 {
    let leading = value.abs().log10().floor() as i32;
    leading.saturating_add(DECIMAL_MAX_SCALE + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use probable_common::RoundingMode;
    use rust_decimal_macros::dec;

    fn p(value: f64) -> DoubleProbability {
        DoubleProbability::new(value).unwrap()
    }

    #[test]
    fn test_construction_bounds() {
        assert!(DoubleProbability::new(0.0).is_ok());
        assert!(DoubleProbability::new(1.0).is_ok());
        assert!(DoubleProbability::new(0.37).is_ok());

        assert!(matches!(
            DoubleProbability::new(-1e-12),
            Err(ProbabilityError::OutOfRange { .. })
        ));
        assert!(matches!(
            DoubleProbability::new(1.0 + 1e-12),
            Err(ProbabilityError::OutOfRange { .. })
        ));
        assert!(DoubleProbability::new(f64::NAN).is_err());
    }

    #[test]
    fn test_from_decimal() {
        let prob = DoubleProbability::from_decimal(dec!(0.75)).unwrap();
        assert_eq!(prob.value(), 0.75);

        assert!(matches!(
            DoubleProbability::from_decimal(dec!(1.0000001)),
            Err(ProbabilityError::OutOfRange { .. })
        ));
        assert!(matches!(
            DoubleProbability::from_decimal(dec!(-0.5)),
            Err(ProbabilityError::OutOfRange { .. })
        ));
        assert_eq!(
            DoubleProbability::from_decimal_opt(None).unwrap_err(),
            ProbabilityError::NullInput
        );
    }

    #[test]
    fn test_from_decimal_drops_extra_digits() {
        let prob = DoubleProbability::from_decimal(dec!(0.1234567890123456789012345)).unwrap();
        assert!((prob.value() - 0.123_456_789_012_345_68).abs() < 1e-15);
    }

    #[test]
    fn test_render_default_context() {
        let ctx = PrecisionContext::DOUBLE;
        assert_eq!(p(0.1).to_decimal_with(&ctx).unwrap(), dec!(0.1));
        assert_eq!(p(0.5).to_decimal_with(&ctx).unwrap().to_string(), "0.5");
        assert_eq!(p(1.0).to_decimal_with(&ctx).unwrap(), Decimal::ONE);
        assert_eq!(p(0.0).to_decimal_with(&ctx).unwrap(), Decimal::ZERO);

        // 0.1 + 0.2 renders as 0.3 at fifteen digits
        let sum = p(0.1).add_same(&p(0.2));
        assert_eq!(sum.to_decimal_with(&ctx).unwrap(), dec!(0.3));
    }

    #[test]
    fn test_render_rounding_modes() {
        let prob = p(0.125);
        let render = |rounding| {
            prob.to_decimal_with(&PrecisionContext::new(2, rounding))
                .unwrap()
        };

        assert_eq!(render(RoundingMode::HalfEven), dec!(0.12));
        assert_eq!(render(RoundingMode::HalfUp), dec!(0.13));
        assert_eq!(render(RoundingMode::HalfDown), dec!(0.12));
        assert_eq!(render(RoundingMode::Floor), dec!(0.12));
        assert_eq!(render(RoundingMode::Ceiling), dec!(0.13));
        assert_eq!(render(RoundingMode::Down), dec!(0.12));
        assert_eq!(render(RoundingMode::Up), dec!(0.13));
    }

    #[test]
    fn test_render_unrepresentable() {
        let huge = p(0.5).pow(-200);
        assert!(matches!(
            huge.to_decimal_with(&PrecisionContext::DOUBLE),
            Err(ProbabilityError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn test_render_tiny_values_fails() {
        for tiny in [1.234_567_890_123e-20, 1e-30, f64::MIN_POSITIVE, 5e-324] {
            let result = p(tiny).to_decimal_with(&PrecisionContext::DOUBLE);
            assert!(
                matches!(result, Err(ProbabilityError::Unrepresentable { .. })),
                "{:e} rendered as {:?}",
                tiny,
                result
            );
        }

        // Chained likelihoods end up in the same place
        let product = p(1e-6).pow(6);
        assert!(product.value() > 0.0);
        assert!(matches!(
            product.to_decimal_with(&PrecisionContext::DOUBLE),
            Err(ProbabilityError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn test_render_small_values_keep_all_digits() {
        let ctx = PrecisionContext::DOUBLE;
        assert_eq!(p(1e-12).to_decimal_with(&ctx).unwrap(), dec!(0.000000000001));

        let small = p(1.234_567_890_123_45e-12).to_decimal_with(&ctx).unwrap();
        assert_eq!(small, dec!(0.00000000000123456789012345));

        // Fewer digits fit where more would not
        let coarse = PrecisionContext::new(5, RoundingMode::HalfEven);
        assert_eq!(
            p(1.234_567_890_123e-20).to_decimal_with(&coarse).unwrap(),
            dec!(0.000000000000000000012346)
        );
    }

    #[test]
    fn test_zero_and_one() {
        assert!(p(0.0).is_zero());
        assert!(p(1e-9).is_zero());
        assert!(!p(1e-7).is_zero());

        assert!(p(1.0).is_one());
        assert!(p(0.5).add_same(&p(0.5)).is_one());
        assert!(!p(0.9999).is_one());
    }

    #[test]
    fn test_validity_after_arithmetic() {
        let over = p(0.8).add_same(&p(0.7));
        assert!(!over.is_valid());
        assert!((over.value() - 1.5).abs() < 1e-12);

        let under = p(0.2).subtract_same(&p(0.7));
        assert!(!under.is_valid());

        // Within the threshold of the bounds still counts as valid
        let edge = DoubleProbability::unchecked(1.0 + 5e-9);
        assert!(edge.is_valid());
        let edge = DoubleProbability::unchecked(-5e-9);
        assert!(edge.is_valid());
    }

    #[test]
    fn test_division() {
        let quotient = p(0.25).divide_same(&p(0.5)).unwrap();
        assert_eq!(quotient.value(), 0.5);

        assert_eq!(
            p(1.0).divide_same(&p(0.0)).unwrap_err(),
            ProbabilityError::DivisionByZero
        );
        // Tolerantly zero divisors are rejected as well
        assert_eq!(
            p(0.5).divide_same(&p(1e-9)).unwrap_err(),
            ProbabilityError::DivisionByZero
        );
    }

    #[test]
    fn test_pow() {
        assert_eq!(p(0.5).pow(2).compare_same(&p(0.25)), Ordering::Equal);
        assert!(p(0.3).pow(0).is_one());
        assert_eq!(p(0.5).pow(-1).value(), 2.0);
    }

    #[test]
    fn test_pow_big_uses_low_bits() {
        let exponent = (BigInt::from(1u64) << 32) + 3;
        assert_eq!(p(0.5).pow_big(&exponent).value(), 0.125);
        assert_eq!(p(0.5).pow_big(&BigInt::from(2)).value(), 0.25);
    }

    #[test]
    fn test_complement() {
        assert_eq!(p(0.3).complement().compare_same(&p(0.7)), Ordering::Equal);
        assert!(p(1.0).complement().is_zero());
    }

    #[test]
    fn test_sums_to_one() {
        let table = vec![p(0.2), p(0.3), p(0.5)];
        assert!(DoubleProbability::sum_is_one(&table).unwrap());

        // The receiver plays no part in the sum
        assert!(p(0.0).sums_to_one(&table).unwrap());
        assert!(!p(1.0).sums_to_one(&[p(0.2), p(0.3)]).unwrap());

        let tenths = vec![p(0.1); 10];
        assert!(DoubleProbability::sum_is_one(&tenths).unwrap());

        let empty: Vec<DoubleProbability> = Vec::new();
        assert!(!DoubleProbability::sum_is_one(&empty).unwrap());
    }
}
