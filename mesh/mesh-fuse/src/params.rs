//! Parameters for fragment fusion.

use mesh_decimate::DecimateParams;

use crate::error::{FuseError, FuseResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default vertex budget for a fused mesh.
pub const DEFAULT_MAX_VERTICES: usize = 100_000;

/// Default cap on threshold-doubling decimation passes.
pub const DEFAULT_MAX_DECIMATION_PASSES: u32 = 16;

/// Parameters for fusing fragments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FuseParams {
    /// Decimation kicks in when the concatenated mesh has more vertices
    /// than this. Default: 100 000
    pub max_vertices: usize,

    /// Spatial-merge settings for the first decimation pass.
    pub decimation: DecimateParams,

    /// When a pass leaves the mesh over budget, the merge distance is
    /// doubled and the pass repeated, at most this many times in total.
    /// Default: 16
    pub max_decimation_passes: u32,
}

impl Default for FuseParams {
    fn default() -> Self {
        Self {
            max_vertices: DEFAULT_MAX_VERTICES,
            decimation: DecimateParams::default(),
            max_decimation_passes: DEFAULT_MAX_DECIMATION_PASSES,
        }
    }
}

impl FuseParams {
    /// Creates new parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Small budget and coarse merging, for live previews.
    #[must_use]
    pub fn preview() -> Self {
        Self {
            max_vertices: 20_000,
            decimation: DecimateParams::coarse(),
            ..Self::default()
        }
    }

    /// Sets the vertex budget.
    #[must_use]
    pub const fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    /// Sets the decimation parameters.
    #[must_use]
    pub fn with_decimation(mut self, decimation: DecimateParams) -> Self {
        self.decimation = decimation;
        self
    }

    /// Sets the pass cap.
    #[must_use]
    pub const fn with_max_decimation_passes(mut self, passes: u32) -> Self {
        self.max_decimation_passes = passes;
        self
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero budget, zero passes, or an invalid merge
    /// distance.
    pub fn validate(&self) -> FuseResult<()> {
        if self.max_vertices == 0 {
            return Err(FuseError::ZeroVertexBudget);
        }
        if self.max_decimation_passes == 0 {
            return Err(FuseError::ZeroDecimationPasses);
        }
        self.decimation.validate()?;
        Ok(())
    }
}
