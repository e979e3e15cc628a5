//! Rolling-window anomaly detection for voltage streams
//!
//! This crate re-exports the workspace crates:
//!
//! - [`anomaly_core`]: error type, numeric trait, ring buffer and window statistics
//! - [`anomaly_detect`]: the z-score and hybrid detectors, stream monitor and sinks
//! - [`anomaly_sim`]: seedable voltage simulator
//! - `anomaly_viz`: HTML charts of a recorded run (`charts` feature)
//!
//! plus [`MonitorConfig`] for describing a whole simulated run.
//!
//! # Example
//!
//! ```rust
//! use stream_anomaly::prelude::*;
//!
//! let detector = HybridDetector::default();
//! let readings = VoltageSimulator::from_seed(SimulationParameters::realtime(), 1)
//!     .unwrap()
//!     .stream(30);
//!
//! let mut monitor = StreamMonitor::new(detector).unwrap();
//! let summary = monitor.run(readings);
//! assert_eq!(summary.processed, 30);
//! assert_eq!(summary.evaluated, 21);
//! ```

pub mod config;

pub use anomaly_core;
pub use anomaly_detect;
pub use anomaly_sim;
#[cfg(feature = "charts")]
pub use anomaly_viz;

pub use config::{DetectorConfig, MonitorConfig, CONFIG_ENV};

pub mod prelude {
    pub use crate::config::{DetectorConfig, MonitorConfig};
    pub use anomaly_core::{Numeric, RollingWindow, Window, WindowStats, ZeroVariancePolicy};
    pub use anomaly_detect::{
        AlertSink, AnomalyDetector, AnomalyDetectorProperties, AnomalyReason, Detection,
        DetectionSink, HybridDetector, HybridParameters, MonitorSummary, NullSink, RecordingSink,
        StreamMonitor, Verdict, ZScoreDetector, ZScoreParameters,
    };
    pub use anomaly_sim::{SimulatedReading, SimulationParameters, VoltageSimulator};
    #[cfg(feature = "charts")]
    pub use anomaly_viz::{line_chart, save_html, scatter_chart, ChartLabels};
}
