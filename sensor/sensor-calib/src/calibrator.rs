//! The calibration state machine.

use tracing::{debug, info};

use crate::params::CalibrationParams;
use crate::quad::{ImagePoint, ImageSize, QuadObservation};
use crate::reference::ReferenceObject;
use crate::result::CalibrationResult;
use crate::scale::scale_factor;
use crate::time::Timestamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the calibrator is in its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CalibrationState {
    /// Not calibrating.
    #[default]
    Idle,
    /// Accepting candidate quads.
    Calibrating,
    /// A result is available.
    Completed,
}

/// What [`ScaleCalibrator::submit_candidates`] did with a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The calibrator was not calibrating; nothing changed.
    Ignored,
    /// Candidates were stored but none was confident enough.
    Pending {
        /// Quads that passed the aspect-ratio filter.
        candidates: usize,
    },
    /// The best candidate was accepted.
    Accepted(CalibrationResult),
}

/// Recovers metres-per-image-unit from a reference object in view.
///
/// # Example
///
/// ```
/// use sensor_calib::{
///     CalibrationState, ImagePoint, QuadObservation, ReferenceObject, ScaleCalibrator,
///     SubmitOutcome,
/// };
///
/// let mut calibrator = ScaleCalibrator::default();
/// calibrator.start_calibration();
///
/// let quad = QuadObservation::new(
///     [
///         ImagePoint::new(0.2, 0.4),
///         ImagePoint::new(0.628, 0.4),
///         ImagePoint::new(0.628, 0.67),
///         ImagePoint::new(0.2, 0.67),
///     ],
///     0.9,
/// );
/// let outcome = calibrator.submit_candidates(&[quad], ReferenceObject::CreditCard);
/// assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
/// assert_eq!(calibrator.state(), CalibrationState::Completed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScaleCalibrator {
    params: CalibrationParams,
    state: CalibrationState,
    result: Option<CalibrationResult>,
    candidates: Vec<QuadObservation>,
}

impl ScaleCalibrator {
    /// Creates an idle calibrator.
    #[must_use]
    pub fn new(params: CalibrationParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// The parameters in use.
    #[must_use]
    pub const fn params(&self) -> &CalibrationParams {
        &self.params
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CalibrationState {
        self.state
    }

    /// Most recent result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&CalibrationResult> {
        self.result.as_ref()
    }

    /// Candidates from the last accepted batch, best first.
    #[must_use]
    pub fn candidates(&self) -> &[QuadObservation] {
        &self.candidates
    }

    /// Enter `Calibrating`, discarding any previous result and candidates.
    pub fn start_calibration(&mut self) {
        self.result = None;
        self.candidates.clear();
        self.state = CalibrationState::Calibrating;
        info!("Calibration started");
    }

    /// Return to `Idle` without a result. Does nothing unless calibrating.
    pub fn stop_calibration(&mut self) {
        if self.state == CalibrationState::Calibrating {
            self.state = CalibrationState::Idle;
            info!("Calibration stopped");
        }
    }

    /// Offer detected quads.
    ///
    /// Quads with a confidence in `[0, 1]` whose bounding-box aspect ratio is
    /// within tolerance of the reference ratio are kept, ordered by
    /// descending confidence. If the best
    /// one is strictly more confident than `min_confidence` its scale is
    /// computed against `params.frame_size` and the calibrator completes.
    pub fn submit_candidates(
        &mut self,
        quads: &[QuadObservation],
        reference: ReferenceObject,
    ) -> SubmitOutcome {
        if self.state != CalibrationState::Calibrating {
            return SubmitOutcome::Ignored;
        }

        let target = reference.aspect_ratio();
        let mut kept: Vec<QuadObservation> = quads
            .iter()
            .filter(|q| (0.0..=1.0).contains(&q.confidence))
            .filter(|q| self.params.ratio_matches(q.aspect_ratio(), target))
            .copied()
            .collect();
        kept.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        debug!(
            submitted = quads.len(),
            kept = kept.len(),
            target_ratio = target,
            "Filtered calibration candidates"
        );
        self.candidates = kept;

        let Some(best) = self.candidates.first().copied() else {
            return SubmitOutcome::Pending { candidates: 0 };
        };
        if best.confidence <= self.params.min_confidence {
            return SubmitOutcome::Pending {
                candidates: self.candidates.len(),
            };
        }

        let result = CalibrationResult {
            scale_factor: scale_factor(&best.corners, self.params.frame_size, reference),
            confidence: best.confidence,
            corners: best.corners,
            reference,
            timestamp: Timestamp::now(),
        };
        info!(
            scale_factor = result.scale_factor,
            confidence = result.confidence,
            reference = reference.display_name(),
            "Calibration accepted"
        );
        self.result = Some(result.clone());
        self.state = CalibrationState::Completed;
        SubmitOutcome::Accepted(result)
    }

    /// Calibrate from four user-placed corners (TL, TR, BR, BL), normalized.
    ///
    /// Any other number of points yields `None` and leaves the calibrator
    /// untouched. Works from any state; the candidate list is kept.
    pub fn calibrate_manually(
        &mut self,
        corners: &[ImagePoint],
        image_size: ImageSize,
        reference: ReferenceObject,
    ) -> Option<CalibrationResult> {
        let Ok(corners) = <[ImagePoint; 4]>::try_from(corners) else {
            debug!(points = corners.len(), "Manual calibration needs exactly four corners");
            return None;
        };

        let result = CalibrationResult {
            scale_factor: scale_factor(&corners, image_size, reference),
            confidence: 1.0,
            corners,
            reference,
            timestamp: Timestamp::now(),
        };
        info!(
            scale_factor = result.scale_factor,
            reference = reference.display_name(),
            "Manual calibration completed"
        );
        self.result = Some(result.clone());
        self.state = CalibrationState::Completed;
        Some(result)
    }

    /// Whether `result` is plausible: scale within the band and confidence
    /// at least `min_confidence`.
    #[must_use]
    pub fn validate(&self, result: &CalibrationResult) -> bool {
        self.params.in_band(result.scale_factor) && result.confidence >= self.params.min_confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn card_quad(confidence: f64) -> QuadObservation {
        QuadObservation::new(
            [
                ImagePoint::new(0.2, 0.4),
                ImagePoint::new(0.628, 0.4),
                ImagePoint::new(0.628, 0.67),
                ImagePoint::new(0.2, 0.67),
            ],
            confidence,
        )
    }

    fn square_quad(confidence: f64) -> QuadObservation {
        QuadObservation::new(
            [
                ImagePoint::new(0.1, 0.1),
                ImagePoint::new(0.3, 0.1),
                ImagePoint::new(0.3, 0.3),
                ImagePoint::new(0.1, 0.3),
            ],
            confidence,
        )
    }

    #[test]
    fn test_starts_idle() {
        let c = ScaleCalibrator::default();
        assert_eq!(c.state(), CalibrationState::Idle);
        assert!(c.result().is_none());
        assert!(c.candidates().is_empty());
    }

    #[test]
    fn test_submit_ignored_when_idle() {
        let mut c = ScaleCalibrator::default();
        let outcome = c.submit_candidates(&[card_quad(0.9)], ReferenceObject::CreditCard);
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert!(c.candidates().is_empty());
    }

    #[test]
    fn test_low_confidence_stays_pending() {
        let mut c = ScaleCalibrator::default();
        c.start_calibration();
        let outcome = c.submit_candidates(&[card_quad(0.5), card_quad(0.75)], ReferenceObject::CreditCard);
        assert_eq!(outcome, SubmitOutcome::Pending { candidates: 2 });
        assert_eq!(c.state(), CalibrationState::Calibrating);
        assert_relative_eq!(c.candidates()[0].confidence, 0.75);
    }

    #[test]
    fn test_filter_and_sort() {
        let mut c = ScaleCalibrator::default();
        c.start_calibration();
        let outcome = c.submit_candidates(
            &[card_quad(0.6), square_quad(0.99), card_quad(0.95)],
            ReferenceObject::CreditCard,
        );
        assert_eq!(c.candidates().len(), 2);
        assert_relative_eq!(c.candidates()[0].confidence, 0.95);
        let SubmitOutcome::Accepted(result) = outcome else {
            panic!("expected acceptance");
        };
        assert_relative_eq!(result.confidence, 0.95);
        assert_eq!(result.corners, card_quad(0.95).corners);
    }

    #[test]
    fn test_out_of_range_confidence_dropped() {
        let mut c = ScaleCalibrator::default();
        c.start_calibration();
        let outcome = c.submit_candidates(
            &[card_quad(0.9), card_quad(f64::NAN), card_quad(1.5), card_quad(-0.1)],
            ReferenceObject::CreditCard,
        );
        assert_eq!(c.candidates().len(), 1);
        let SubmitOutcome::Accepted(result) = outcome else {
            panic!("expected acceptance");
        };
        assert_relative_eq!(result.confidence, 0.9);

        c.start_calibration();
        let outcome = c.submit_candidates(&[card_quad(f64::NAN)], ReferenceObject::CreditCard);
        assert_eq!(outcome, SubmitOutcome::Pending { candidates: 0 });
        assert_eq!(c.state(), CalibrationState::Calibrating);
        assert!(c.result().is_none());
    }

    #[test]
    fn test_accept_uses_frame_size() {
        let params = CalibrationParams::new().with_frame_size(ImageSize::new(1000.0, 1000.0));
        let mut c = ScaleCalibrator::new(params);
        c.start_calibration();
        let outcome = c.submit_candidates(&[card_quad(0.9)], ReferenceObject::CreditCard);
        let SubmitOutcome::Accepted(result) = outcome else {
            panic!("expected acceptance");
        };
        assert_relative_eq!(result.scale_factor, 2.0e-4, epsilon = 1e-9);
        assert!(c.validate(&result));
    }

    #[test]
    fn test_start_clears_previous_run() {
        let mut c = ScaleCalibrator::default();
        c.start_calibration();
        c.submit_candidates(&[card_quad(0.9)], ReferenceObject::CreditCard);
        assert!(c.result().is_some());

        c.start_calibration();
        assert!(c.result().is_none());
        assert!(c.candidates().is_empty());
        assert_eq!(c.state(), CalibrationState::Calibrating);
    }

    #[test]
    fn test_stop() {
        let mut c = ScaleCalibrator::default();
        c.start_calibration();
        c.stop_calibration();
        assert_eq!(c.state(), CalibrationState::Idle);
        assert!(c.result().is_none());

        c.calibrate_manually(&card_quad(1.0).corners, ImageSize::NORMALIZED, ReferenceObject::CreditCard);
        c.stop_calibration();
        assert_eq!(c.state(), CalibrationState::Completed);
    }

    #[test]
    fn test_manual_point_count() {
        let mut c = ScaleCalibrator::default();
        let corners = card_quad(1.0).corners;
        assert!(c.calibrate_manually(&corners[..3], ImageSize::NORMALIZED, ReferenceObject::CreditCard).is_none());
        assert_eq!(c.state(), CalibrationState::Idle);

        let result = c
            .calibrate_manually(&corners, ImageSize::NORMALIZED, ReferenceObject::CreditCard)
            .unwrap();
        assert_relative_eq!(result.confidence, 1.0);
        assert_eq!(c.state(), CalibrationState::Completed);
    }

    #[test]
    fn test_manual_keeps_candidates() {
        let mut c = ScaleCalibrator::default();
        c.start_calibration();
        c.submit_candidates(&[card_quad(0.5)], ReferenceObject::CreditCard);
        c.calibrate_manually(&card_quad(1.0).corners, ImageSize::NORMALIZED, ReferenceObject::CreditCard);
        assert_eq!(c.candidates().len(), 1);
    }

    #[test]
    fn test_validate_thresholds() {
        let c = ScaleCalibrator::default();
        let mut result = CalibrationResult {
            scale_factor: 2.0e-4,
            confidence: 0.75,
            corners: [ImagePoint::default(); 4],
            reference: ReferenceObject::CreditCard,
            timestamp: Timestamp::default(),
        };
        assert!(c.validate(&result));

        result.confidence = 0.74;
        assert!(!c.validate(&result));

        result.confidence = 1.0;
        result.scale_factor = 1.0;
        assert!(!c.validate(&result));

        result.scale_factor = f64::INFINITY;
        assert!(!c.validate(&result));
    }
}
