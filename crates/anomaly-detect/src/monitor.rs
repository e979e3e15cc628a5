//! Online monitoring of a reading stream
//!
//! The monitor is the caller that owns window management: it appends each
//! reading to a bounded [`RollingWindow`], asks the detector about the newest
//! reading, stamps its stream position and forwards everything to a sink.
//! Readings are consumed lazily and strictly in arrival order; memory stays
//! bounded by the window size however long the stream is.

use crate::sink::{DetectionSink, NullSink};
use crate::traits::AnomalyDetector;
use crate::types::Verdict;
use anomaly_core::{Numeric, Result, RollingWindow};
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Counts for a monitored stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    /// Readings consumed
    pub processed: usize,
    /// Readings that had a full window behind them
    pub evaluated: usize,
    /// Stream positions of flagged readings, ascending
    pub anomaly_indices: Vec<usize>,
}

impl MonitorSummary {
    pub fn anomalies(&self) -> usize {
        self.anomaly_indices.len()
    }

    /// Fraction of evaluated readings that were flagged
    pub fn anomaly_rate(&self) -> f64 {
        if self.evaluated == 0 {
            0.0
        } else {
            self.anomalies() as f64 / self.evaluated as f64
        }
    }
}

impl fmt::Display for MonitorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Readings processed: {}", self.processed)?;
        writeln!(f, "Readings evaluated: {}", self.evaluated)?;
        write!(f, "Total number of anomalies detected: {}", self.anomalies())
    }
}

/// Drives a detector over a stream of readings
///
/// # Type Parameters
///
/// - `T`: The reading type
/// - `D`: The detector judging each full window
/// - `S`: The sink receiving every reading and verdict
pub struct StreamMonitor<T: Numeric, D: AnomalyDetector<T>, S: DetectionSink<T> = NullSink> {
    detector: D,
    window: RollingWindow<T>,
    sink: S,
    summary: MonitorSummary,
    pacing: Option<Duration>,
    _phantom: PhantomData<T>,
}

impl<T: Numeric, D: AnomalyDetector<T>> StreamMonitor<T, D, NullSink> {
    /// Create a monitor with no sink
    pub fn new(detector: D) -> Result<Self> {
        Self::with_sink(detector, NullSink)
    }
}

impl<T: Numeric, D: AnomalyDetector<T>, S: DetectionSink<T>> StreamMonitor<T, D, S> {
    /// Create a monitor whose window matches the detector's window size
    pub fn with_sink(detector: D, sink: S) -> Result<Self> {
        let window = RollingWindow::new(detector.window_size())?;
        Ok(Self {
            detector,
            window,
            sink,
            summary: MonitorSummary::default(),
            pacing: None,
            _phantom: PhantomData,
        })
    }

    /// Sleep for `delay` after each reading, for display pacing
    pub fn with_pacing(mut self, delay: Duration) -> Self {
        self.pacing = Some(delay);
        self
    }

    /// Process a single reading and return its verdict
    pub fn process(&mut self, value: T) -> Verdict<T> {
        let index = self.summary.processed;
        self.window.push(value);
        let verdict = self.detector.detect(&self.window).with_index(index);

        self.summary.processed += 1;
        if verdict.is_evaluated() {
            self.summary.evaluated += 1;
        }
        if verdict.is_anomaly() {
            debug!(index, value = ?value, "reading flagged");
            self.summary.anomaly_indices.push(index);
        }

        self.sink.record(index, value, &verdict);
        verdict
    }

    /// Consume a stream to exhaustion and finish the sink
    #[instrument(skip_all, fields(algorithm = self.detector.algorithm_name(), window = self.window.capacity()))]
    pub fn run<I>(&mut self, readings: I) -> MonitorSummary
    where
        I: IntoIterator<Item = T>,
    {
        for value in readings {
            self.process(value);
            if let Some(delay) = self.pacing {
                std::thread::sleep(delay);
            }
        }
        info!(
            processed = self.summary.processed,
            anomalies = self.summary.anomalies(),
            "stream exhausted"
        );
        self.sink.finish(&self.summary);
        self.summary.clone()
    }

    pub fn summary(&self) -> &MonitorSummary {
        &self.summary
    }

    pub fn window(&self) -> &RollingWindow<T> {
        &self.window
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Forget all readings; the sink is left untouched
    pub fn reset(&mut self) {
        self.window.clear();
        self.summary = MonitorSummary::default();
    }
}
