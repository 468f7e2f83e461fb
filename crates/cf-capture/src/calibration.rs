//! Calibrator shared between the session thread and readers.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use sensor_calib::{
    CalibrationParams, CalibrationResult, CalibrationState, ImagePoint, ImageSize,
    QuadObservation, ReferenceObject, ScaleCalibrator, SubmitOutcome,
};

/// A consistent view of the calibrator after one transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationSnapshot {
    /// State after the transition.
    pub state: CalibrationState,
    /// Result, if any.
    pub result: Option<CalibrationResult>,
    /// Candidates from the last accepted batch, best first.
    pub candidates: Vec<QuadObservation>,
}

impl CalibrationSnapshot {
    fn capture(calibrator: &ScaleCalibrator) -> Self {
        Self {
            state: calibrator.state(),
            result: calibrator.result().cloned(),
            candidates: calibrator.candidates().to_vec(),
        }
    }
}

/// [`ScaleCalibrator`] behind a lock, publishing immutable snapshots.
///
/// Writers are serialized; every transition swaps a fresh
/// [`CalibrationSnapshot`] in before the writer lock is released, so readers
/// see either the old or the new state, never a mix.
#[derive(Debug)]
pub struct SharedCalibrator {
    calibrator: Mutex<ScaleCalibrator>,
    published: RwLock<Arc<CalibrationSnapshot>>,
}

impl Default for SharedCalibrator {
    fn default() -> Self {
        Self::new(CalibrationParams::default())
    }
}

impl SharedCalibrator {
    /// Creates an idle shared calibrator.
    #[must_use]
    pub fn new(params: CalibrationParams) -> Self {
        let calibrator = ScaleCalibrator::new(params);
        let snapshot = Arc::new(CalibrationSnapshot::capture(&calibrator));
        Self {
            calibrator: Mutex::new(calibrator),
            published: RwLock::new(snapshot),
        }
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CalibrationSnapshot> {
        Arc::clone(&*self.published.read())
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CalibrationState {
        self.published.read().state
    }

    /// Current result.
    #[must_use]
    pub fn result(&self) -> Option<CalibrationResult> {
        self.published.read().result.clone()
    }

    /// The calibrator's parameters.
    #[must_use]
    pub fn params(&self) -> CalibrationParams {
        self.calibrator.lock().params().clone()
    }

    /// See [`ScaleCalibrator::start_calibration`].
    pub fn start_calibration(&self) {
        self.transition(ScaleCalibrator::start_calibration);
    }

    /// See [`ScaleCalibrator::stop_calibration`].
    pub fn stop_calibration(&self) {
        self.transition(ScaleCalibrator::stop_calibration);
    }

    /// See [`ScaleCalibrator::submit_candidates`].
    pub fn submit_candidates(
        &self,
        quads: &[QuadObservation],
        reference: ReferenceObject,
    ) -> SubmitOutcome {
        self.transition(|c| c.submit_candidates(quads, reference))
    }

    /// See [`ScaleCalibrator::calibrate_manually`].
    pub fn calibrate_manually(
        &self,
        corners: &[ImagePoint],
        image_size: ImageSize,
        reference: ReferenceObject,
    ) -> Option<CalibrationResult> {
        self.transition(|c| c.calibrate_manually(corners, image_size, reference))
    }

    /// See [`ScaleCalibrator::validate`].
    #[must_use]
    pub fn validate(&self, result: &CalibrationResult) -> bool {
        self.calibrator.lock().validate(result)
    }

    fn transition<R>(&self, f: impl FnOnce(&mut ScaleCalibrator) -> R) -> R {
        let mut calibrator = self.calibrator.lock();
        let out = f(&mut *calibrator);
        *self.published.write() = Arc::new(CalibrationSnapshot::capture(&calibrator));
        out
    }
}
