//! Streaming detection: z-score OR absolute deviation
//!
//! A large excursion inflates the spread of the very window it is scored
//! against, which can pull its own z-score under the threshold. The
//! absolute check `|x - mean| > abs_threshold` is expressed in reading units
//! and does not depend on the window spread, so it still catches it.

use crate::baseline::Baseline;
use crate::params::HybridParameters;
use crate::traits::{AnomalyDetector, AnomalyDetectorProperties};
use crate::types::{AnomalyReason, Verdict};
use anomaly_core::{Numeric, Result, Window};
use tracing::debug;

/// Z-score detector with a fixed-magnitude fallback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HybridDetector {
    params: HybridParameters,
}

impl HybridDetector {
    pub fn new(params: HybridParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Create a detector with the default zero-variance policy
    pub fn with_thresholds(window_size: usize, z_threshold: f64, abs_threshold: f64) -> Result<Self> {
        Self::new(HybridParameters::new(window_size, z_threshold, abs_threshold))
    }

    pub fn parameters(&self) -> &HybridParameters {
        &self.params
    }
}

impl AnomalyDetectorProperties for HybridDetector {
    fn algorithm_name(&self) -> &'static str {
        "Z-Score + Absolute Deviation"
    }

    fn window_size(&self) -> usize {
        self.params.window_size
    }
}

impl<T: Numeric> AnomalyDetector<T> for HybridDetector {
    fn detect<W: Window<T> + ?Sized>(&self, window: &W) -> Verdict<T> {
        let baseline =
            match Baseline::evaluate(window, self.params.window_size, self.params.zero_variance) {
                Ok(baseline) => baseline,
                Err(verdict) => return verdict,
            };

        let z_fired = baseline.z_exceeds(self.params.z_threshold);
        let abs_fired = baseline.deviation_exceeds(self.params.abs_threshold);
        debug!(
            value = ?baseline.value,
            mean = ?baseline.stats.mean,
            std_dev = ?baseline.stats.std_dev,
            z = ?baseline.z_score,
            deviation = ?baseline.deviation,
            z_fired,
            abs_fired,
            "hybrid check evaluated"
        );

        let reason = AnomalyReason::from_checks(z_fired, abs_fired);
        Verdict::Evaluated(baseline.into_detection(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zscore::ZScoreDetector;

    // Nine readings summing to 2055 plus 245: mean exactly 230, sigma ~20.9
    const INFLATED: [f64; 10] = [
        200.0, 260.0, 205.0, 255.0, 210.0, 250.0, 215.0, 235.0, 225.0, 245.0,
    ];

    #[test]
    fn test_absolute_fallback_catches_inflated_window() {
        let zscore = ZScoreDetector::with_threshold(10, 2.0).unwrap();
        assert!(!zscore.is_anomaly(&INFLATED));

        let hybrid = HybridDetector::with_thresholds(10, 2.0, 10.0).unwrap();
        let verdict = hybrid.detect(&INFLATED);
        let detection = verdict.detection().unwrap();
        assert_eq!(detection.mean, 230.0);
        assert_eq!(detection.deviation, 15.0);
        assert!(detection.z_score.abs() < 2.0);
        assert!(detection.is_anomaly);
        assert_eq!(detection.reason, Some(AnomalyReason::AbsoluteDeviation));
    }

    #[test]
    fn test_both_checks_fire_on_spike() {
        let hybrid = HybridDetector::with_thresholds(10, 2.0, 10.0).unwrap();
        let window = [230.0, 231.0, 229.0, 230.0, 232.0, 228.0, 230.0, 231.0, 229.0, 285.0];
        let verdict = hybrid.detect(&window);
        assert_eq!(verdict.detection().unwrap().reason, Some(AnomalyReason::Both));
    }

    #[test]
    fn test_z_only_on_small_scale_signal() {
        // Millivolt-scale wobble: z fires, absolute deviation stays under 10
        let hybrid = HybridDetector::with_thresholds(5, 1.99, 10.0).unwrap();
        let verdict = hybrid.detect(&[0.0, 0.0, 0.0, 0.0, 5.0]);
        assert_eq!(verdict.detection().unwrap().reason, Some(AnomalyReason::ZScore));
    }

    #[test]
    fn test_absolute_boundary_is_strict() {
        let window = [0.0, 0.0, 0.0, 0.0, 5.0];
        let at = HybridDetector::with_thresholds(5, 100.0, 4.0).unwrap();
        let below = HybridDetector::with_thresholds(5, 100.0, 3.99).unwrap();
        assert!(!at.is_anomaly(&window));
        assert!(below.is_anomaly(&window));
    }

    #[test]
    fn test_warming_up_returns_false() {
        let hybrid = HybridDetector::default();
        for len in 0..hybrid.window_size() {
            let window = vec![999.0; len];
            let verdict = hybrid.detect(&window);
            assert!(!verdict.is_evaluated());
            assert!(!verdict.is_anomaly());
        }
    }

    #[test]
    fn test_constant_window_with_absolute_check() {
        let hybrid = HybridDetector::with_thresholds(10, 2.0, 0.0).unwrap();
        assert!(!hybrid.is_anomaly(&[230.0; 10]));
    }

    #[test]
    fn test_small_spread_at_large_mean_f32() {
        // 0.18 V off the mean with sigma 0.06 V: z fires, absolute deviation does not
        let mut window = [230.0f32; 10];
        window[9] = 230.2;
        let hybrid = HybridDetector::default();
        let verdict = hybrid.detect(&window);
        assert_eq!(
            verdict.detection().unwrap().reason,
            Some(AnomalyReason::ZScore)
        );
    }
}
