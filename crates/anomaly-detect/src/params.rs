//! Detector parameters
//!
//! Defaults follow the two reference setups: a 30-reading window with a
//! 2σ threshold for daily batches, and a 10-reading window with a 2σ / 10 V
//! pair for the per-second monitor.

use anomaly_core::{check_threshold, Error, Result, ZeroVariancePolicy};
use serde::{Deserialize, Serialize};

/// Parameters for the windowed z-score detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZScoreParameters {
    /// Number of trailing readings the statistics are taken over
    pub window_size: usize,
    /// A reading is anomalous when `|z| > threshold`
    pub threshold: f64,
    /// Behaviour for windows without spread
    pub zero_variance: ZeroVariancePolicy,
}

impl Default for ZScoreParameters {
    fn default() -> Self {
        Self {
            window_size: 30,
            threshold: 2.0,
            zero_variance: ZeroVariancePolicy::default(),
        }
    }
}

impl ZScoreParameters {
    pub fn new(window_size: usize, threshold: f64) -> Self {
        Self {
            window_size,
            threshold,
            ..Self::default()
        }
    }

    pub fn with_zero_variance(mut self, policy: ZeroVariancePolicy) -> Self {
        self.zero_variance = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(Error::invalid_window_size(self.window_size));
        }
        check_threshold("threshold", self.threshold)
    }
}

/// Parameters for the streaming detector combining z-score and absolute deviation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridParameters {
    pub window_size: usize,
    /// Scale-free check: `|z| > z_threshold`
    pub z_threshold: f64,
    /// Unit-bearing check: `|x - mean| > abs_threshold`, in reading units
    pub abs_threshold: f64,
    pub zero_variance: ZeroVariancePolicy,
}

impl Default for HybridParameters {
    fn default() -> Self {
        Self {
            window_size: 10,
            z_threshold: 2.0,
            abs_threshold: 10.0,
            zero_variance: ZeroVariancePolicy::default(),
        }
    }
}

impl HybridParameters {
    pub fn new(window_size: usize, z_threshold: f64, abs_threshold: f64) -> Self {
        Self {
            window_size,
            z_threshold,
            abs_threshold,
            ..Self::default()
        }
    }

    pub fn with_zero_variance(mut self, policy: ZeroVariancePolicy) -> Self {
        self.zero_variance = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(Error::invalid_window_size(self.window_size));
        }
        check_threshold("z_threshold", self.z_threshold)?;
        check_threshold("abs_threshold", self.abs_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let z = ZScoreParameters::default();
        assert_eq!((z.window_size, z.threshold), (30, 2.0));
        assert!(z.validate().is_ok());

        let h = HybridParameters::default();
        assert_eq!((h.window_size, h.z_threshold, h.abs_threshold), (10, 2.0, 10.0));
        assert!(h.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(ZScoreParameters::new(1, 2.0).validate().is_err());
        assert!(ZScoreParameters::new(10, -1.0).validate().is_err());
        assert!(ZScoreParameters::new(10, f64::NAN).validate().is_err());
        assert!(HybridParameters::new(0, 2.0, 10.0).validate().is_err());
        assert!(HybridParameters::new(10, 2.0, f64::INFINITY).validate().is_err());
        assert!(HybridParameters::new(10, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: HybridParameters = serde_json::from_str(r#"{"abs_threshold": 15.0}"#).unwrap();
        assert_eq!(params.window_size, 10);
        assert_eq!(params.abs_threshold, 15.0);

        let params: ZScoreParameters =
            serde_json::from_str(r#"{"window_size": 12, "zero_variance": "flag_deviation"}"#)
                .unwrap();
        assert_eq!(params.window_size, 12);
        assert_eq!(params.threshold, 2.0);
        assert_eq!(params.zero_variance, ZeroVariancePolicy::FlagDeviation);
    }
}
