//! Standard trait integration for DoubleProbability
//!
//! Operators and comparisons route through the contract methods, so they
//! share its tolerance and validation rules.

use std::cmp::Ordering;
use std::iter::Sum;
use std::str::FromStr;

use probable_common::{ProbabilityError, ProbabilityNumber, Result};
use rust_decimal::Decimal;

use crate::double::DoubleProbability;

impl PartialEq for DoubleProbability {
    fn eq(&self, other: &Self) -> bool {
        self.compare_same(other) == Ordering::Equal
    }
}

impl PartialOrd for DoubleProbability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare_same(other))
    }
}

impl std::ops::Add for DoubleProbability {
    type Output = DoubleProbability;

    fn add(self, rhs: DoubleProbability) -> Self::Output {
        self.add_same(&rhs)
    }
}

impl std::ops::Sub for DoubleProbability {
    type Output = DoubleProbability;

    fn sub(self, rhs: DoubleProbability) -> Self::Output {
        self.subtract_same(&rhs)
    }
}

impl std::ops::Mul for DoubleProbability {
    type Output = DoubleProbability;

    fn mul(self, rhs: DoubleProbability) -> Self::Output {
        self.multiply_same(&rhs)
    }
}

/// Division can fail, so the operator yields a `Result`
impl std::ops::Div for DoubleProbability {
    type Output = Result<DoubleProbability>;

    fn div(self, rhs: DoubleProbability) -> Self::Output {
        self.divide_same(&rhs)
    }
}

impl Sum for DoubleProbability {
    fn sum<I: Iterator<Item = DoubleProbability>>(iter: I) -> Self {
        iter.fold(DoubleProbability::ZERO, |acc, p| acc.add_same(&p))
    }
}

impl<'a> Sum<&'a DoubleProbability> for DoubleProbability {
    fn sum<I: Iterator<Item = &'a DoubleProbability>>(iter: I) -> Self {
        iter.fold(DoubleProbability::ZERO, |acc, p| acc.add_same(p))
    }
}

impl TryFrom<f64> for DoubleProbability {
    type Error = ProbabilityError;

    fn try_from(value: f64) -> Result<Self> {
        DoubleProbability::new(value)
    }
}

impl TryFrom<Decimal> for DoubleProbability {
    type Error = ProbabilityError;

    fn try_from(value: Decimal) -> Result<Self> {
        DoubleProbability::from_decimal(value)
    }
}

impl From<DoubleProbability> for f64 {
    fn from(value: DoubleProbability) -> Self {
        value.value()
    }
}

impl FromStr for DoubleProbability {
    type Err = ProbabilityError;

    /// Parse a decimal string such as `"0.25"` or `"2.5e-1"`
    ///
    /// Literals with more fractional digits than `Decimal` holds, such as
    /// `"1e-30"`, are read as `f64` instead.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ProbabilityError::NullInput);
        }

        let exact = if s.contains(['e', 'E']) {
            Decimal::from_scientific(s)
        } else {
            Decimal::from_str_exact(s)
        };
        match exact {
            Ok(decimal) => DoubleProbability::from_decimal(decimal),
            Err(err) => {
                let scalar: f64 = s.parse().map_err(|_| ProbabilityError::from(err))?;
                DoubleProbability::new(scalar)
            }
        }
    }
}

impl std::fmt::Display for DoubleProbability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_decimal() {
            Ok(decimal) => write!(f, "{}", decimal),
            Err(_) => write!(f, "{:e}", self.value()),
        }
    }
}
