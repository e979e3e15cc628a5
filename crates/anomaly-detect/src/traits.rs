//! Core traits for anomaly detection
//!
//! Detectors are stateless: they look at a window handed to them by the
//! caller and judge its newest reading. Window management (appending, trimming
//! to size) belongs to the caller, typically a [`crate::StreamMonitor`].

use crate::types::Verdict;
use anomaly_core::{Numeric, Window};

/// Properties of a detector that don't depend on the reading type
pub trait AnomalyDetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Number of trailing readings a verdict is based on
    fn window_size(&self) -> usize;

    /// Check if a window of `len` readings can be evaluated
    fn can_evaluate(&self, len: usize) -> bool {
        len >= self.window_size()
    }
}

/// Judge the newest reading of a window
pub trait AnomalyDetector<T: Numeric>: AnomalyDetectorProperties {
    /// Evaluate the newest reading against the trailing `window_size()` readings
    ///
    /// Must be a pure function of `window`.
    fn detect<W: Window<T> + ?Sized>(&self, window: &W) -> Verdict<T>;

    /// `true` only when the window is full and the newest reading is flagged
    fn is_anomaly<W: Window<T> + ?Sized>(&self, window: &W) -> bool {
        self.detect(window).is_anomaly()
    }
}

impl<T: Numeric, D: AnomalyDetector<T>> AnomalyDetector<T> for &D {
    fn detect<W: Window<T> + ?Sized>(&self, window: &W) -> Verdict<T> {
        (**self).detect(window)
    }
}

impl<D: AnomalyDetectorProperties> AnomalyDetectorProperties for &D {
    fn algorithm_name(&self) -> &'static str {
        (**self).algorithm_name()
    }

    fn window_size(&self) -> usize {
        (**self).window_size()
    }
}
