//! # Probable Double
//!
//! Probability values backed by a native `f64`.
//!
//! ## Behaviour
//!
//! - Construction from a fraction or a [`rust_decimal::Decimal`] is range
//!   checked exactly against [0, 1]
//! - Arithmetic is plain floating-point arithmetic; results are not range
//!   checked, use [`ProbabilityNumber::is_valid`] to detect excursions
//! - Equality and ordering absorb differences up to
//!   [`probable_common::DEFAULT_ROUNDING_THRESHOLD`]
//! - Decimal rendering keeps at most 15 significant digits
//!
//! ```
//! use probable_double::{DoubleProbability, ProbabilityNumber};
//!
//! let a = DoubleProbability::new(0.1).unwrap();
//! let b = DoubleProbability::new(0.2).unwrap();
//! let c = DoubleProbability::new(0.3).unwrap();
//! assert!(a.add(&b).unwrap().equals(&c).unwrap());
//! ```

pub mod double;
mod ops;

pub use double::DoubleProbability;
pub use probable_common::{
    PrecisionContext, PrecisionSettings, ProbabilityError, ProbabilityNumber, Result, RoundingMode,
};
