//! Precision context used when rendering probabilities as decimals
//!
//! A [`PrecisionContext`] is an immutable value: the number of significant
//! digits kept and the rounding policy applied to the dropped ones. Each
//! backing representation owns one [`PrecisionRegistry`] holding the
//! process-wide context its `to_decimal` conversions observe.

use parking_lot::RwLock;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ProbabilityError, Result};

/// Significant digits an IEEE 754 double reproduces faithfully
pub const DOUBLE_MAX_PRECISION: u32 = 15;

/// Digit rounding policy for decimal rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Away from zero
    Up,
    /// Towards zero
    Down,
    /// Towards positive infinity
    Ceiling,
    /// Towards negative infinity
    Floor,
    /// Nearest neighbour, ties away from zero
    HalfUp,
    /// Nearest neighbour, ties towards zero
    HalfDown,
    /// Nearest neighbour, ties to the even digit
    HalfEven,
}

impl RoundingMode {
    /// All supported modes
    pub const ALL: [RoundingMode; 7] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
    ];

    /// Equivalent strategy of the decimal backend
    pub fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl Default for RoundingMode {
    fn default() -> Self {
        // Minimizes cumulative bias over repeated roundings
        RoundingMode::HalfEven
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = ProbabilityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(RoundingMode::Up),
            "down" => Ok(RoundingMode::Down),
            "ceiling" => Ok(RoundingMode::Ceiling),
            "floor" => Ok(RoundingMode::Floor),
            "half_up" => Ok(RoundingMode::HalfUp),
            "half_down" => Ok(RoundingMode::HalfDown),
            "half_even" => Ok(RoundingMode::HalfEven),
            other => Err(ProbabilityError::Config(format!(
                "Unknown rounding mode: {}",
                other
            ))),
        }
    }
}

/// Significant digit count plus rounding policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrecisionContext {
    /// Significant decimal digits kept
    pub precision: u32,
    /// Policy for the dropped digits
    pub rounding: RoundingMode,
}

impl PrecisionContext {
    /// Context for double-backed values: 15 digits, half-even
    pub const DOUBLE: PrecisionContext = PrecisionContext {
        precision: DOUBLE_MAX_PRECISION,
        rounding: RoundingMode::HalfEven,
    };

    pub fn new(precision: u32, rounding: RoundingMode) -> Self {
        Self {
            precision,
            rounding,
        }
    }

    /// Same rounding with a different digit count
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Same digit count with a different rounding policy
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Check the context against a backing type's digit limit
    pub fn validate(&self, max_precision: u32) -> Result<()> {
        if self.precision == 0 {
            return Err(ProbabilityError::InvalidPrecision);
        }
        if self.precision > max_precision {
            return Err(ProbabilityError::PrecisionExceeded {
                requested: self.precision,
                max: max_precision,
            });
        }
        Ok(())
    }
}

impl Default for PrecisionContext {
    fn default() -> Self {
        Self::DOUBLE
    }
}

impl std::fmt::Display for PrecisionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "precision={} rounding={:?}", self.precision, self.rounding)
    }
}

/// Process-wide precision context for one backing representation
///
/// Overrides are committed under a write lock, so a conversion always sees
/// either the previous or the new context, never a mix of the two.
pub struct PrecisionRegistry {
    /// Digit limit of the backing type
    max_precision: u32,
    /// Context installed at startup and restored by `reset`
    initial: PrecisionContext,
    /// Currently committed context
    current: RwLock<PrecisionContext>,
}

impl PrecisionRegistry {
    /// Registry starting at `initial`, bounded by `max_precision` digits
    pub const fn new(max_precision: u32, initial: PrecisionContext) -> Self {
        Self {
            max_precision,
            initial,
            current: parking_lot::const_rwlock(initial),
        }
    }

    /// Digit limit of the backing type
    #[inline]
    pub fn max_precision(&self) -> u32 {
        self.max_precision
    }

    /// Most recently committed context
    #[inline]
    pub fn current(&self) -> PrecisionContext {
        *self.current.read()
    }

    /// Replace the committed context
    ///
    /// Already rendered decimals are unaffected; every later conversion
    /// observes `context`.
    pub fn override_with(&self, context: PrecisionContext) -> Result<()> {
        if let Err(err) = context.validate(self.max_precision) {
            warn!(%context, max = self.max_precision, "Rejected precision override");
            return Err(err);
        }

        let mut current = self.current.write();
        let previous = *current;
        debug!(from = %previous, to = %context, "Overriding precision globally");
        *current = context;
        Ok(())
    }

    /// Restore the startup context
    pub fn reset(&self) {
        let mut current = self.current.write();
        debug!(to = %self.initial, "Resetting precision to default");
        *current = self.initial;
    }
}

impl std::fmt::Debug for PrecisionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrecisionRegistry")
            .field("max_precision", &self.max_precision)
            .field("current", &self.current())
            .finish()
    }
}
