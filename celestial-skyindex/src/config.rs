//! Index construction settings.

use crate::constants::{DEFAULT_INCLUSIVE_FACTOR, DEFAULT_RESAMPLE_STEP_ARCMIN};
use crate::errors::{SkyIndexError, SkyIndexResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings shared by every index strategy built from one
/// [`IndexFactory`](crate::IndexFactory).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndexConfig {
    /// Oversampling factor passed to inclusive disc/polygon/triangle queries.
    ///
    /// `0` keeps only pixels whose center lies inside the shape; a power of two
    /// keeps every pixel touching the shape, tested that many times finer.
    /// Default: 4
    pub inclusive_factor: u32,

    /// Angular step between interpolated vertices when densifying polygon
    /// edges, in arcminutes.
    /// Default: 10
    pub resample_step_arcmin: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            inclusive_factor: DEFAULT_INCLUSIVE_FACTOR,
            resample_step_arcmin: DEFAULT_RESAMPLE_STEP_ARCMIN,
        }
    }
}

impl IndexConfig {
    pub fn with_inclusive_factor(mut self, factor: u32) -> Self {
        self.inclusive_factor = factor;
        self
    }

    pub fn with_resample_step_arcmin(mut self, step: f64) -> Self {
        self.resample_step_arcmin = step;
        self
    }

    pub fn validate(&self) -> SkyIndexResult<()> {
        if self.inclusive_factor != 0 && !self.inclusive_factor.is_power_of_two() {
            return Err(SkyIndexError::invalid_config(format!(
                "inclusive factor {} is neither 0 nor a power of two",
                self.inclusive_factor
            )));
        }
        if !self.resample_step_arcmin.is_finite() || self.resample_step_arcmin <= 0.0 {
            return Err(SkyIndexError::invalid_config(format!(
                "resample step {}' must be finite and positive",
                self.resample_step_arcmin
            )));
        }
        Ok(())
    }
}
