//! Types produced by anomaly detectors

use anomaly_core::Numeric;
use num_traits::ToPrimitive;
use std::fmt;

/// Which check flagged a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyReason {
    /// `|z|` exceeded the z-score threshold
    ZScore,
    /// `|x - mean|` exceeded the absolute threshold
    AbsoluteDeviation,
    /// Both checks fired
    Both,
}

impl AnomalyReason {
    pub(crate) fn from_checks(z_fired: bool, abs_fired: bool) -> Option<Self> {
        match (z_fired, abs_fired) {
            (true, true) => Some(AnomalyReason::Both),
            (true, false) => Some(AnomalyReason::ZScore),
            (false, true) => Some(AnomalyReason::AbsoluteDeviation),
            (false, false) => None,
        }
    }
}

impl fmt::Display for AnomalyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyReason::ZScore => write!(f, "z-score"),
            AnomalyReason::AbsoluteDeviation => write!(f, "absolute deviation"),
            AnomalyReason::Both => write!(f, "z-score and absolute deviation"),
        }
    }
}

/// Outcome of evaluating the latest reading of a full window
#[derive(Debug, Clone, PartialEq)]
pub struct Detection<T: Numeric> {
    /// Position of the reading in the stream, when known
    pub index: Option<usize>,
    /// The reading under test (the newest in the window)
    pub value: T,
    /// Window mean
    pub mean: T::Float,
    /// Window population standard deviation
    pub std_dev: T::Float,
    /// `(value - mean) / std_dev`, resolved by the zero-variance policy when `std_dev` is 0
    pub z_score: T::Float,
    /// `value - mean`
    pub deviation: T::Float,
    pub is_anomaly: bool,
    /// Set exactly when `is_anomaly` is true
    pub reason: Option<AnomalyReason>,
}

impl<T: Numeric> Detection<T> {
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Two-sided normal tail probability of the z-score
    ///
    /// Small values mean the reading is unlikely under a normal baseline.
    pub fn p_value(&self) -> f64 {
        let z = self.z_score.to_f64().unwrap_or(f64::NAN).abs();
        statrs::function::erf::erfc(z / std::f64::consts::SQRT_2)
    }
}

impl<T: Numeric> fmt::Display for Detection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let z = self.z_score.to_f64().unwrap_or(f64::NAN);
        let mean = self.mean.to_f64().unwrap_or(f64::NAN);
        let std_dev = self.std_dev.to_f64().unwrap_or(f64::NAN);
        if let Some(index) = self.index {
            write!(f, "#{index} ")?;
        }
        write!(
            f,
            "value={:?} mean={mean:.3} std_dev={std_dev:.3} z={z:.3}",
            self.value
        )?;
        match self.reason {
            Some(reason) => write!(f, " ANOMALY ({reason})"),
            None => Ok(()),
        }
    }
}

/// Result of asking a detector about a window
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict<T: Numeric> {
    /// The window is still warming up
    InsufficientData { required: usize, actual: usize },
    /// The window contains NaN or infinite readings
    NonFinite,
    /// The newest reading was evaluated
    Evaluated(Detection<T>),
}

impl<T: Numeric> Verdict<T> {
    /// True only for an evaluated, flagged reading
    pub fn is_anomaly(&self) -> bool {
        matches!(self, Verdict::Evaluated(d) if d.is_anomaly)
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(self, Verdict::Evaluated(_))
    }

    pub fn detection(&self) -> Option<&Detection<T>> {
        match self {
            Verdict::Evaluated(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_detection(self) -> Option<Detection<T>> {
        match self {
            Verdict::Evaluated(d) => Some(d),
            _ => None,
        }
    }

    /// Stamp the stream position on an evaluated reading
    pub fn with_index(self, index: usize) -> Self {
        match self {
            Verdict::Evaluated(d) => Verdict::Evaluated(d.with_index(index)),
            other => other,
        }
    }
}

impl<T: Numeric> fmt::Display for Verdict<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::InsufficientData { required, actual } => {
                write!(f, "not enough data ({actual}/{required} readings)")
            }
            Verdict::NonFinite => write!(f, "window contains non-finite readings"),
            Verdict::Evaluated(d) => write!(f, "{d}"),
        }
    }
}
