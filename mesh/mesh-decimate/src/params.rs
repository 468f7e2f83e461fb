//! Parameters for mesh decimation.

use crate::error::{DecimateError, DecimateResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default merge distance, in world units (2 cm for metric AR sessions).
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 0.02;

/// What happens to per-vertex normals when vertices are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NormalPolicy {
    /// Each kept vertex keeps its own normal.
    #[default]
    Keep,
    /// Output carries no normals.
    Drop,
}

/// Parameters for spatial-merge decimation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecimateParams {
    /// A vertex closer than this to an already kept vertex is merged into
    /// it. Default: 0.02
    pub distance_threshold: f64,

    /// Normal handling for merged output. Default: [`NormalPolicy::Keep`]
    pub normal_policy: NormalPolicy,
}

impl Default for DecimateParams {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            normal_policy: NormalPolicy::Keep,
        }
    }
}

impl DecimateParams {
    /// Create params with a specific merge distance.
    #[must_use]
    pub fn with_threshold(distance_threshold: f64) -> Self {
        Self {
            distance_threshold,
            ..Default::default()
        }
    }

    /// Fine merging (5 mm), for small objects.
    #[must_use]
    pub fn fine() -> Self {
        Self::with_threshold(0.005)
    }

    /// Coarse merging (5 cm), for room-scale previews.
    #[must_use]
    pub fn coarse() -> Self {
        Self::with_threshold(0.05)
    }

    /// Set the normal policy.
    #[must_use]
    pub const fn with_normal_policy(mut self, policy: NormalPolicy) -> Self {
        self.normal_policy = policy;
        self
    }

    /// Same params with the merge distance multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            distance_threshold: self.distance_threshold * factor,
            normal_policy: self.normal_policy,
        }
    }

    /// Check that the merge distance is positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`DecimateError::InvalidThreshold`] otherwise.
    pub fn validate(&self) -> DecimateResult<()> {
        if !self.distance_threshold.is_finite() || self.distance_threshold <= 0.0 {
            return Err(DecimateError::InvalidThreshold(self.distance_threshold));
        }
        Ok(())
    }
}
