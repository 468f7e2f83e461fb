//! Metric scale calibration from a reference object of known size.
//!
//! AR geometry arrives in session units; to measure a room the app needs
//! metres per image unit. The user places a credit card or a sheet of US
//! letter paper in view, a detector reports candidate quadrilaterals, and
//! [`ScaleCalibrator`] picks the best one whose shape matches the reference.
//!
//! # Workflow
//!
//! ```text
//! Idle --start--> Calibrating --confident candidate--> Completed
//!                     |
//!                     +--stop--> Idle
//!
//! calibrate_manually: any state --> Completed
//! ```
//!
//! # Coordinates
//!
//! Candidate corners are normalized to [0, 1] with a top-left origin, ordered
//! TL, TR, BR, BL. Detectors reporting a bottom-left origin are converted with
//! [`QuadObservation::to_top_left`].
//!
//! # Example
//!
//! ```
//! use sensor_calib::{ImagePoint, ImageSize, ReferenceObject, ScaleCalibrator};
//!
//! let mut calibrator = ScaleCalibrator::default();
//! let corners = [
//!     ImagePoint::new(0.2, 0.4),
//!     ImagePoint::new(0.628, 0.4),
//!     ImagePoint::new(0.628, 0.67),
//!     ImagePoint::new(0.2, 0.67),
//! ];
//! let result = calibrator
//!     .calibrate_manually(&corners, ImageSize::new(1000.0, 1000.0), ReferenceObject::CreditCard)
//!     .unwrap();
//!
//! assert!((result.scale_factor - 2.0e-4).abs() < 1e-9);
//! assert!(calibrator.validate(&result));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod calibrator;
mod error;
mod guidance;
mod params;
mod quad;
mod reference;
mod result;
mod scale;
mod time;

pub use calibrator::{CalibrationState, ScaleCalibrator, SubmitOutcome};
pub use error::{CalibError, CalibResult};
pub use guidance::{instructions, recommended_reference_objects};
pub use params::CalibrationParams;
pub use quad::{CoordinateOrigin, ImagePoint, ImageSize, QuadObservation};
pub use reference::ReferenceObject;
pub use result::CalibrationResult;
pub use scale::{longest_edge, scale_factor};
pub use time::Timestamp;
