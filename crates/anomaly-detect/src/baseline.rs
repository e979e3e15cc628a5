//! Statistics step shared by the detectors
//!
//! Both detectors gate on a full window, reject non-finite input, take the
//! window mean and spread, and score the newest reading. Only the final
//! decision differs.

use crate::types::{AnomalyReason, Detection, Verdict};
use anomaly_core::{Numeric, Window, WindowStats, ZeroVariancePolicy};
use num_traits::{Float, ToPrimitive};
use tracing::trace;

/// Newest reading of a full window with its baseline statistics
pub(crate) struct Baseline<T: Numeric> {
    pub value: T,
    pub stats: WindowStats<T::Float>,
    pub z_score: T::Float,
    pub deviation: T::Float,
}

impl<T: Numeric> Baseline<T> {
    /// Compute the baseline over the trailing `window_size` readings
    ///
    /// Returns the verdict to report directly when the window cannot be scored.
    pub fn evaluate<W>(
        window: &W,
        window_size: usize,
        policy: ZeroVariancePolicy,
    ) -> Result<Self, Verdict<T>>
    where
        W: Window<T> + ?Sized,
    {
        let actual = window.len();
        let insufficient = Verdict::InsufficientData {
            required: window_size,
            actual,
        };
        if actual < window_size {
            trace!(actual, required = window_size, "window warming up");
            return Err(insufficient);
        }

        let skip = actual - window_size;
        if window.values().skip(skip).any(|v| !v.is_finite()) {
            return Err(Verdict::NonFinite);
        }

        let (Some(stats), Some(value)) = (WindowStats::trailing(window, window_size), window.latest())
        else {
            return Err(insufficient);
        };
        let z_score = stats.z_score(value.to_float(), policy);
        let deviation = stats.deviation(value.to_float());

        Ok(Self {
            value,
            stats,
            z_score,
            deviation,
        })
    }

    /// Strict `|z| > threshold`
    pub fn z_exceeds(&self, threshold: f64) -> bool {
        exceeds(self.z_score, threshold)
    }

    /// Strict `|x - mean| > threshold`
    pub fn deviation_exceeds(&self, threshold: f64) -> bool {
        exceeds(self.deviation, threshold)
    }

    pub fn into_detection(self, reason: Option<AnomalyReason>) -> Detection<T> {
        Detection {
            index: None,
            value: self.value,
            mean: self.stats.mean,
            std_dev: self.stats.std_dev,
            z_score: self.z_score,
            deviation: self.deviation,
            is_anomaly: reason.is_some(),
            reason,
        }
    }
}

fn exceeds<F: Float>(score: F, threshold: f64) -> bool {
    score.abs().to_f64().is_some_and(|s| s > threshold)
}
