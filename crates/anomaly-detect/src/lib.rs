//! Rolling-window anomaly detectors
//!
//! This crate decides whether the newest reading of a window is anomalous.
//!
//! # Detectors
//!
//! - **[`ZScoreDetector`]**: the windowed (batch) variant. Flags the newest
//!   reading when `|z| > threshold`, with mean and population standard
//!   deviation taken over the trailing window.
//! - **[`HybridDetector`]**: the streaming variant. Same z-score test,
//!   OR-combined with a fixed-magnitude check `|x - mean| > abs_threshold`
//!   that survives a spike inflating its own window's spread.
//!
//! Both are stateless. Until the window holds `window_size` readings they
//! return [`Verdict::InsufficientData`], which is never anomalous.
//!
//! # Streams
//!
//! [`StreamMonitor`] owns the rolling window, consumes any iterator of
//! readings in order and forwards each verdict to a [`DetectionSink`].
//!
//! ```rust
//! use anomaly_detect::{AnomalyDetector, HybridDetector, StreamMonitor, ZScoreDetector};
//!
//! let detector = ZScoreDetector::with_threshold(10, 2.0).unwrap();
//! let window = [230.0, 231.0, 229.0, 230.0, 232.0, 228.0, 230.0, 231.0, 229.0, 285.0];
//! assert!(detector.is_anomaly(&window));
//!
//! let mut monitor = StreamMonitor::new(HybridDetector::default()).unwrap();
//! let summary = monitor.run(window);
//! assert_eq!(summary.anomaly_indices, vec![9]);
//! ```

mod baseline;
pub mod hybrid;
pub mod monitor;
pub mod params;
pub mod sink;
pub mod traits;
pub mod types;
pub mod zscore;

pub use hybrid::HybridDetector;
pub use monitor::{MonitorSummary, StreamMonitor};
pub use params::{HybridParameters, ZScoreParameters};
pub use sink::{AlertSink, AnomalyMark, DetectionSink, NullSink, RecordingSink};
pub use traits::{AnomalyDetector, AnomalyDetectorProperties};
pub use types::{AnomalyReason, Detection, Verdict};
pub use zscore::ZScoreDetector;

pub use anomaly_core::{Error, Result, RollingWindow, Window, WindowStats, ZeroVariancePolicy};
