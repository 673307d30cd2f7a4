//! Precision settings loaded from the environment

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::ProbabilityNumber;
use crate::error::{ProbabilityError, Result};
use crate::precision::{PrecisionContext, RoundingMode};

/// Environment variable holding the significant digit count
pub const ENV_MAX_PRECISION: &str = "PROBABLE_MAX_PRECISION";

/// Environment variable holding the rounding mode name
pub const ENV_ROUNDING_MODE: &str = "PROBABLE_ROUNDING_MODE";

/// Precision configuration for an embedding application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrecisionSettings {
    /// Context to install at startup
    pub context: PrecisionContext,
}

impl PrecisionSettings {
    /// Load settings from `.env` and the process environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup over the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(val) = lookup(ENV_MAX_PRECISION) {
            let precision = val.trim().parse().map_err(|e| {
                ProbabilityError::Config(format!("Invalid {}={:?}: {}", ENV_MAX_PRECISION, val, e))
            })?;
            cfg.context = cfg.context.with_precision(precision);
        }
        if let Some(val) = lookup(ENV_ROUNDING_MODE) {
            cfg.context = cfg.context.with_rounding(val.parse::<RoundingMode>()?);
        }

        Ok(cfg)
    }

    /// Install the settings as the process-wide context of backing `P`
    pub fn apply<P: ProbabilityNumber>(&self) -> Result<()> {
        debug!(context = %self.context, "Applying precision settings");
        P::override_computation_precision_globally(self.context)
    }
}
