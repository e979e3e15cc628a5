//! Run configuration for the monitoring demos
//!
//! A run is a detector, a simulated signal, a length and an optional pacing
//! delay, loadable from JSON:
//!
//! ```json
//! {
//!   "detector": { "kind": "hybrid", "window_size": 10, "z_threshold": 2.0, "abs_threshold": 10.0 },
//!   "simulation": { "anomaly_chance": 0.1 },
//!   "readings": 30,
//!   "pacing_ms": 1000,
//!   "seed": 7
//! }
//! ```
//!
//! Missing fields fall back to the daily preset.

use anomaly_core::{Error, Result};
use anomaly_detect::{
    AnomalyDetector, DetectionSink, HybridDetector, HybridParameters, MonitorSummary,
    StreamMonitor, ZScoreDetector, ZScoreParameters,
};
use anomaly_sim::{SimulationParameters, VoltageSimulator};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable naming a JSON run configuration
pub const CONFIG_ENV: &str = "STREAM_ANOMALY_CONFIG";

/// Which detector a run uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectorConfig {
    ZScore(ZScoreParameters),
    Hybrid(HybridParameters),
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig::ZScore(ZScoreParameters::default())
    }
}

impl DetectorConfig {
    pub fn window_size(&self) -> usize {
        match self {
            DetectorConfig::ZScore(p) => p.window_size,
            DetectorConfig::Hybrid(p) => p.window_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            DetectorConfig::ZScore(p) => p.validate(),
            DetectorConfig::Hybrid(p) => p.validate(),
        }
    }
}

/// A complete simulated monitoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub detector: DetectorConfig,
    pub simulation: SimulationParameters,
    /// Number of readings to generate
    pub readings: usize,
    /// Delay after each reading in milliseconds; 0 disables pacing
    pub pacing_ms: u64,
    /// Simulator seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::daily()
    }
}

impl MonitorConfig {
    /// A year of daily readings through the windowed z-score detector
    pub fn daily() -> Self {
        Self {
            detector: DetectorConfig::ZScore(ZScoreParameters::default()),
            simulation: SimulationParameters::daily(),
            readings: 365,
            pacing_ms: 0,
            seed: None,
        }
    }

    /// Thirty one-second readings through the streaming detector
    pub fn realtime() -> Self {
        Self {
            detector: DetectorConfig::Hybrid(HybridParameters::default()),
            simulation: SimulationParameters::realtime(),
            readings: 30,
            pacing_ms: 1000,
            seed: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading run configuration");
        Self::from_json_str(&json)
    }

    /// Load from the file named by [`CONFIG_ENV`], or fall back to `preset`
    pub fn from_env_or(preset: Self) -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(path),
            None => Ok(preset),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.detector.validate()?;
        self.simulation.validate()?;
        if self.readings == 0 {
            return Err(Error::InvalidParameter("readings must be positive".into()));
        }
        Ok(())
    }

    pub fn pacing(&self) -> Option<Duration> {
        (self.pacing_ms > 0).then(|| Duration::from_millis(self.pacing_ms))
    }

    /// Generate the configured stream and monitor it, returning the sink afterwards
    pub fn run_with_sink<S: DetectionSink<f64>>(&self, sink: S) -> Result<(MonitorSummary, S)> {
        self.validate()?;
        let seed = self.seed.unwrap_or_else(rand::random);
        info!(seed, readings = self.readings, "starting simulated run");

        let readings = VoltageSimulator::from_seed(self.simulation, seed)?.stream(self.readings);
        match self.detector {
            DetectorConfig::ZScore(params) => {
                drive(ZScoreDetector::new(params)?, sink, readings, self.pacing())
            }
            DetectorConfig::Hybrid(params) => {
                drive(HybridDetector::new(params)?, sink, readings, self.pacing())
            }
        }
    }
}

fn drive<D, S, I>(
    detector: D,
    sink: S,
    readings: I,
    pacing: Option<Duration>,
) -> Result<(MonitorSummary, S)>
where
    D: AnomalyDetector<f64>,
    S: DetectionSink<f64>,
    I: Iterator<Item = f64>,
{
    let mut monitor = StreamMonitor::with_sink(detector, sink)?;
    if let Some(delay) = pacing {
        monitor = monitor.with_pacing(delay);
    }
    let summary = monitor.run(readings);
    Ok((summary, monitor.into_sink()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly_detect::{NullSink, RecordingSink};

    #[test]
    fn test_presets() {
        let daily = MonitorConfig::daily();
        assert_eq!(daily.detector.window_size(), 30);
        assert_eq!(daily.readings, 365);
        assert_eq!(daily.pacing(), None);

        let realtime = MonitorConfig::realtime();
        assert_eq!(realtime.detector.window_size(), 10);
        assert_eq!(realtime.readings, 30);
        assert_eq!(realtime.pacing(), Some(Duration::from_secs(1)));
        assert_eq!(realtime.simulation.anomaly_chance, 0.1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MonitorConfig::from_json_str(
            r#"{"detector": {"kind": "hybrid", "abs_threshold": 12.5}, "readings": 60, "seed": 3}"#,
        )
        .unwrap();
        match config.detector {
            DetectorConfig::Hybrid(p) => {
                assert_eq!(p.window_size, 10);
                assert_eq!(p.z_threshold, 2.0);
                assert_eq!(p.abs_threshold, 12.5);
            }
            other => panic!("expected hybrid detector, got {other:?}"),
        }
        assert_eq!(config.simulation, SimulationParameters::daily());
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_zero_variance_policy_from_json() {
        let config = MonitorConfig::from_json_str(
            r#"{"detector": {"kind": "z_score", "zero_variance": "flag_deviation"}}"#,
        )
        .unwrap();
        let DetectorConfig::ZScore(params) = config.detector else {
            panic!("expected z-score detector");
        };
        assert_eq!(params.zero_variance, anomaly_core::ZeroVariancePolicy::FlagDeviation);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(
            MonitorConfig::from_json_str(r#"{"detector": {"kind": "median"}}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            MonitorConfig::from_json_str(r#"{"detector": {"kind": "z_score", "window_size": 1}}"#),
            Err(Error::InvalidParameter(_))
        ));
        assert!(MonitorConfig::from_json_str(r#"{"readings": 0}"#).is_err());
        assert!(matches!(
            MonitorConfig::from_path("/nonexistent/stream-anomaly.json"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let config = MonitorConfig {
            seed: Some(21),
            ..MonitorConfig::daily()
        };
        let (first, _) = config.run_with_sink(NullSink).unwrap();
        let (second, sink) = config.run_with_sink(RecordingSink::new()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.processed, 365);
        assert_eq!(first.evaluated, 365 - 29);
        assert_eq!(sink.anomalies().len(), first.anomalies());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = MonitorConfig {
            seed: Some(9),
            ..MonitorConfig::realtime()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(MonitorConfig::from_json_str(&json).unwrap(), config);
    }
}
