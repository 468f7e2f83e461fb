//! Configuration for a capture context.

use std::path::Path;

use mesh_fuse::FuseParams;
use sensor_calib::CalibrationParams;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CaptureError, CaptureResult};

/// Everything a [`CaptureContext`](crate::CaptureContext) can be tuned with.
///
/// Every field is optional in JSON; missing fields take their defaults.
///
/// # Example
///
/// ```
/// use cf_capture::CoreConfig;
///
/// let config = CoreConfig::from_json_str(r#"{ "fuse": { "max_vertices": 5000 } }"#).unwrap();
/// assert_eq!(config.fuse.max_vertices, 5000);
/// assert!((config.calibration.min_confidence - 0.75).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Fusion and decimation.
    pub fuse: FuseParams,
    /// Scale calibration.
    pub calibration: CalibrationParams,
}

impl CoreConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> CaptureResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> CaptureResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CaptureError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded capture config");
        Self::from_json_str(&content)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> CaptureResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> CaptureResult<()> {
        self.fuse.validate()?;
        self.calibration.validate()?;
        Ok(())
    }
}
