//! Window statistics shared by every detector
//!
//! Mean and population standard deviation over a window, and the z-score of
//! a reading against them. Statistics are always taken over the window only,
//! never over the whole history.

use crate::numeric::Numeric;
use crate::window::Window;
use num_traits::{Float, FromPrimitive, Zero};
use serde::{Deserialize, Serialize};

/// What a z-score means when the window has no spread
///
/// With σ = 0 the ratio `(x - μ) / σ` is undefined. A reading equal to the
/// mean always scores 0; the policy only decides readings that differ from a
/// constant baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroVariancePolicy {
    /// Score 0: a degenerate window never flags a reading
    #[default]
    NotAnomalous,
    /// Score ±∞: any deviation from a constant baseline is flagged
    FlagDeviation,
}

/// Spread at or below this many ULPs of the window's largest magnitude is
/// rounding noise from the mean, not variation in the readings.
const ROUNDING_ULPS: f64 = 4.0;

/// Count, mean and population standard deviation of a window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats<F> {
    pub count: usize,
    pub mean: F,
    pub std_dev: F,
    /// Largest absolute reading in the window
    pub magnitude: F,
}

impl<F: Float + FromPrimitive> WindowStats<F> {
    /// Two-pass mean and population standard deviation
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_values<T, I>(values: I) -> Option<Self>
    where
        T: Numeric<Float = F>,
        I: Iterator<Item = T> + Clone,
    {
        let (count, sum, magnitude) =
            values
                .clone()
                .fold((0usize, F::zero(), F::zero()), |(n, s, m), v| {
                    let x = v.to_float();
                    (n + 1, s + x, m.max(x.abs()))
                });
        if count == 0 {
            return None;
        }
        let n = F::from_usize(count)?;
        let mean = sum / n;
        let sum_sq = values.fold(F::zero(), |acc, v| {
            let d = v.to_float() - mean;
            acc + d * d
        });
        Some(Self {
            count,
            mean,
            std_dev: (sum_sq / n).sqrt(),
            magnitude,
        })
    }

    /// Statistics over an entire window
    pub fn from_window<T, W>(window: &W) -> Option<Self>
    where
        T: Numeric<Float = F>,
        W: Window<T> + ?Sized,
    {
        Self::from_values(window.values())
    }

    /// Statistics over the trailing `size` readings of a window
    pub fn trailing<T, W>(window: &W, size: usize) -> Option<Self>
    where
        T: Numeric<Float = F>,
        W: Window<T> + ?Sized,
    {
        let skip = window.len().saturating_sub(size);
        Self::from_values(window.values().skip(skip))
    }

    pub fn variance(&self) -> F {
        self.std_dev * self.std_dev
    }

    /// A few ULPs of `scale`; zero for an all-zero window
    fn rounding(scale: F) -> F {
        F::epsilon() * F::from_f64(ROUNDING_ULPS).unwrap_or_else(F::one) * scale
    }

    /// Whether the window is constant up to rounding in the mean
    ///
    /// The bound is relative to the readings themselves, so scaling every
    /// reading by the same factor never changes the answer.
    pub fn is_degenerate(&self) -> bool {
        self.std_dev <= Self::rounding(self.magnitude)
    }

    /// Signed distance of `value` from the window mean
    pub fn deviation(&self, value: F) -> F {
        value - self.mean
    }

    /// Number of standard deviations `value` lies from the window mean
    pub fn z_score(&self, value: F, policy: ZeroVariancePolicy) -> F {
        let deviation = self.deviation(value);
        if !self.is_degenerate() {
            return deviation / self.std_dev;
        }
        if deviation.abs() <= Self::rounding(self.magnitude.max(value.abs())) {
            return F::zero();
        }
        match policy {
            ZeroVariancePolicy::NotAnomalous => F::zero(),
            ZeroVariancePolicy::FlagDeviation => F::infinity() * deviation.signum(),
        }
    }
}

impl<F: Zero> Default for WindowStats<F> {
    fn default() -> Self {
        Self {
            count: 0,
            mean: F::zero(),
            std_dev: F::zero(),
            magnitude: F::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use statrs::statistics::Statistics;

    #[test]
    fn test_empty_window_has_no_stats() {
        let empty: &[f64] = &[];
        assert!(WindowStats::from_window(empty).is_none());
    }

    #[test]
    fn test_population_std_dev() {
        let window = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = WindowStats::from_window(&window).unwrap();
        assert_eq!(stats.count, 8);
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.std_dev, 2.0);
        assert_relative_eq!(stats.variance(), 4.0);
    }

    #[test]
    fn test_matches_statrs_population_moments() {
        let window = [230.0, 231.0, 229.0, 230.0, 232.0, 228.0, 230.0, 231.0, 229.0, 285.0];
        let stats = WindowStats::from_window(&window).unwrap();
        assert_relative_eq!(stats.mean, window.iter().mean(), epsilon = 1e-12);
        assert_relative_eq!(
            stats.std_dev,
            window.iter().population_std_dev(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_trailing_uses_only_the_tail() {
        let history = [1000.0, 1.0, 2.0, 3.0];
        let stats = WindowStats::trailing(&history, 3).unwrap();
        assert_eq!(stats.count, 3);
        assert_relative_eq!(stats.mean, 2.0);

        let all = WindowStats::trailing(&history, 10).unwrap();
        assert_eq!(all.count, 4);
    }

    #[test]
    fn test_integer_readings() {
        let window: Vec<i32> = vec![1, 2, 3, 4, 5];
        let stats = WindowStats::from_window(&window).unwrap();
        assert_relative_eq!(stats.mean, 3.0);
        assert_relative_eq!(stats.std_dev, 2.0f64.sqrt());
    }

    #[test]
    fn test_z_score() {
        let stats = WindowStats::from_window(&[0.0, 0.0, 0.0, 0.0, 5.0]).unwrap();
        assert_relative_eq!(stats.mean, 1.0);
        assert_relative_eq!(stats.std_dev, 2.0);
        assert_eq!(stats.z_score(5.0, ZeroVariancePolicy::default()), 2.0);
        assert_eq!(stats.z_score(-3.0, ZeroVariancePolicy::default()), -2.0);
    }

    #[test]
    fn test_constant_window_is_degenerate() {
        let stats = WindowStats::from_window(&[230.0; 10]).unwrap();
        assert!(stats.is_degenerate());
        assert_eq!(stats.std_dev, 0.0);
        for policy in [ZeroVariancePolicy::NotAnomalous, ZeroVariancePolicy::FlagDeviation] {
            assert_eq!(stats.z_score(230.0, policy), 0.0);
        }
    }

    #[test]
    fn test_rounding_noise_counts_as_constant() {
        let stats = WindowStats::from_window(&[0.1; 10]).unwrap();
        assert!(stats.is_degenerate());
        assert_eq!(stats.z_score(0.1, ZeroVariancePolicy::FlagDeviation), 0.0);
    }

    #[test]
    fn test_tiny_spread_is_not_degenerate() {
        // The z = 2 boundary window scaled down by 1e-9
        let stats = WindowStats::from_window(&[0.0, 0.0, 0.0, 0.0, 5e-9]).unwrap();
        assert!(!stats.is_degenerate());
        assert_relative_eq!(stats.std_dev, 2e-9, max_relative = 1e-12);
        assert_relative_eq!(
            stats.z_score(5e-9, ZeroVariancePolicy::default()),
            2.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_small_spread_at_large_mean_f32() {
        let mut window = vec![230.0f32; 9];
        window.push(230.2);
        let stats = WindowStats::from_window(&window).unwrap();
        assert!(!stats.is_degenerate());
        assert_relative_eq!(
            stats.z_score(230.2, ZeroVariancePolicy::default()),
            3.0,
            max_relative = 1e-3
        );
    }

    #[test]
    fn test_zero_variance_policies() {
        let stats = WindowStats::<f64> {
            count: 5,
            mean: 230.0,
            std_dev: 0.0,
            magnitude: 230.0,
        };
        assert_eq!(stats.z_score(240.0, ZeroVariancePolicy::NotAnomalous), 0.0);
        assert_eq!(
            stats.z_score(240.0, ZeroVariancePolicy::FlagDeviation),
            f64::INFINITY
        );
        assert_eq!(
            stats.z_score(220.0, ZeroVariancePolicy::FlagDeviation),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&ZeroVariancePolicy::FlagDeviation).unwrap();
        assert_eq!(json, "\"flag_deviation\"");
        let policy: ZeroVariancePolicy = serde_json::from_str("\"not_anomalous\"").unwrap();
        assert_eq!(policy, ZeroVariancePolicy::NotAnomalous);
    }
}
