//! Windowed z-score detection
//!
//! The batch variant: the newest reading is flagged when it lies more than
//! `threshold` population standard deviations from the mean of its window.
//!
//! Because the reading is part of its own window, `|z|` can never exceed
//! `sqrt(window_size - 1)`; a threshold at or above that bound never fires.

use crate::baseline::Baseline;
use crate::params::ZScoreParameters;
use crate::traits::{AnomalyDetector, AnomalyDetectorProperties};
use crate::types::{AnomalyReason, Verdict};
use anomaly_core::{Numeric, Result, Window, ZeroVariancePolicy};
use tracing::debug;

/// Z-score detector over a fixed trailing window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZScoreDetector {
    params: ZScoreParameters,
}

impl ZScoreDetector {
    /// Create a detector from validated parameters
    pub fn new(params: ZScoreParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Create a detector with the default zero-variance policy
    pub fn with_threshold(window_size: usize, threshold: f64) -> Result<Self> {
        Self::new(ZScoreParameters::new(window_size, threshold))
    }

    pub fn parameters(&self) -> &ZScoreParameters {
        &self.params
    }

    pub fn threshold(&self) -> f64 {
        self.params.threshold
    }

    pub fn zero_variance_policy(&self) -> ZeroVariancePolicy {
        self.params.zero_variance
    }
}

impl AnomalyDetectorProperties for ZScoreDetector {
    fn algorithm_name(&self) -> &'static str {
        "Z-Score"
    }

    fn window_size(&self) -> usize {
        self.params.window_size
    }
}

impl<T: Numeric> AnomalyDetector<T> for ZScoreDetector {
    fn detect<W: Window<T> + ?Sized>(&self, window: &W) -> Verdict<T> {
        let baseline =
            match Baseline::evaluate(window, self.params.window_size, self.params.zero_variance) {
                Ok(baseline) => baseline,
                Err(verdict) => return verdict,
            };

        let z_fired = baseline.z_exceeds(self.params.threshold);
        debug!(
            value = ?baseline.value,
            mean = ?baseline.stats.mean,
            std_dev = ?baseline.stats.std_dev,
            z = ?baseline.z_score,
            anomaly = z_fired,
            "z-score evaluated"
        );

        let reason = AnomalyReason::from_checks(z_fired, false);
        Verdict::Evaluated(baseline.into_detection(reason))
    }
}
