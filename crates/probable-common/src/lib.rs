//! # Probable Common
//!
//! Shared contract, errors, and precision handling for bounded-precision
//! probability values.
//!
//! ## Core Pieces
//!
//! - [`ProbabilityNumber`]: capability set every backing representation implements
//! - [`tolerance::compare`]: absolute-threshold comparison underlying all equality checks
//! - [`PrecisionContext`]: significant digits plus [`RoundingMode`] for decimal rendering
//! - [`PrecisionRegistry`]: process-wide context owned by each backing type
//! - [`PrecisionSettings`]: environment-driven precision configuration

pub mod config;
pub mod contract;
pub mod error;
pub mod precision;
pub mod tolerance;

// Re-export commonly used types at crate root
pub use config::PrecisionSettings;
pub use contract::{low_order_i32, ProbabilityNumber};
pub use error::{ProbabilityError, Result};
pub use num_bigint::BigInt;
pub use precision::{PrecisionContext, PrecisionRegistry, RoundingMode, DOUBLE_MAX_PRECISION};
pub use tolerance::DEFAULT_ROUNDING_THRESHOLD;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
