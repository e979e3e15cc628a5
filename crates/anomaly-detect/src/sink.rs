//! Presentation sinks for monitored streams
//!
//! A [`crate::StreamMonitor`] hands every reading and its verdict to a
//! [`DetectionSink`]. Sinks render, log or record; they have no influence on
//! detection.

use crate::monitor::MonitorSummary;
use crate::types::Verdict;
use anomaly_core::Numeric;
use num_traits::ToPrimitive;
use tracing::{info, warn};

/// Receiver of per-reading detection output
pub trait DetectionSink<T: Numeric> {
    /// Called once per reading, in stream order
    fn record(&mut self, index: usize, value: T, verdict: &Verdict<T>);

    /// Called when the stream is exhausted
    fn finish(&mut self, _summary: &MonitorSummary) {}

    /// Check if this sink actually produces output
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Sink that does nothing
///
/// This is the default sink used when no specific sink is provided.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl<T: Numeric> DetectionSink<T> for NullSink {
    #[inline(always)]
    fn record(&mut self, _index: usize, _value: T, _verdict: &Verdict<T>) {}

    #[inline(always)]
    fn is_enabled(&self) -> bool {
        false
    }
}

/// A flagged reading, numbered in order of detection
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyMark<T> {
    /// 1-based count of this anomaly within the run
    pub ordinal: usize,
    pub index: usize,
    pub value: T,
}

impl<T> AnomalyMark<T> {
    pub fn label(&self) -> String {
        format!("Anomaly {}", self.ordinal)
    }
}

/// Keeps the full series and the flagged points for later rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSink<T> {
    readings: Vec<(usize, T)>,
    anomalies: Vec<AnomalyMark<T>>,
    summary: Option<MonitorSummary>,
}

impl<T> Default for RecordingSink<T> {
    fn default() -> Self {
        Self {
            readings: Vec::new(),
            anomalies: Vec::new(),
            summary: None,
        }
    }
}

impl<T: Numeric> RecordingSink<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every reading as `(index, value)`
    pub fn readings(&self) -> &[(usize, T)] {
        &self.readings
    }

    pub fn anomalies(&self) -> &[AnomalyMark<T>] {
        &self.anomalies
    }

    /// Summary of the finished run, if the stream has ended
    pub fn summary(&self) -> Option<&MonitorSummary> {
        self.summary.as_ref()
    }

    /// Readings as `[index, value]` pairs of `f64`, ready for charting
    pub fn series_f64(&self) -> Vec<[f64; 2]> {
        self.readings
            .iter()
            .map(|&(i, v)| [i as f64, to_f64(v)])
            .collect()
    }

    /// Anomalies as `[index, value]` pairs of `f64`
    pub fn anomalies_f64(&self) -> Vec<[f64; 2]> {
        self.anomalies
            .iter()
            .map(|m| [m.index as f64, to_f64(m.value)])
            .collect()
    }
}

impl<T: Numeric> DetectionSink<T> for RecordingSink<T> {
    fn record(&mut self, index: usize, value: T, verdict: &Verdict<T>) {
        self.readings.push((index, value));
        if verdict.is_anomaly() {
            self.anomalies.push(AnomalyMark {
                ordinal: self.anomalies.len() + 1,
                index,
                value,
            });
        }
    }

    fn finish(&mut self, summary: &MonitorSummary) {
        self.summary = Some(summary.clone());
    }
}

/// Emits a warning per flagged reading and the run total at the end
#[derive(Debug, Default, Clone)]
pub struct AlertSink {
    /// Unit appended to values in alert messages, e.g. "V"
    unit: String,
    alerts: usize,
}

impl AlertSink {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            alerts: 0,
        }
    }

    /// Number of alerts raised so far
    pub fn alerts(&self) -> usize {
        self.alerts
    }
}

impl<T: Numeric> DetectionSink<T> for AlertSink {
    fn record(&mut self, index: usize, value: T, verdict: &Verdict<T>) {
        let Some(detection) = verdict.detection().filter(|d| d.is_anomaly) else {
            return;
        };
        self.alerts += 1;
        let reason = detection
            .reason
            .map(|r| r.to_string())
            .unwrap_or_default();
        warn!(
            index,
            value = to_f64(value),
            unit = %self.unit,
            mean = detection.mean.to_f64().unwrap_or(f64::NAN),
            z = detection.z_score.to_f64().unwrap_or(f64::NAN),
            p_value = detection.p_value(),
            %reason,
            "anomaly {} detected",
            self.alerts
        );
    }

    fn finish(&mut self, summary: &MonitorSummary) {
        info!(
            processed = summary.processed,
            evaluated = summary.evaluated,
            anomalies = summary.anomalies(),
            "Total number of anomalies detected: {}",
            summary.anomalies()
        );
    }
}

/// Fan out to two sinks
impl<T: Numeric, A: DetectionSink<T>, B: DetectionSink<T>> DetectionSink<T> for (A, B) {
    fn record(&mut self, index: usize, value: T, verdict: &Verdict<T>) {
        self.0.record(index, value, verdict);
        self.1.record(index, value, verdict);
    }

    fn finish(&mut self, summary: &MonitorSummary) {
        self.0.finish(summary);
        self.1.finish(summary);
    }

    fn is_enabled(&self) -> bool {
        self.0.is_enabled() || self.1.is_enabled()
    }
}

fn to_f64<T: Numeric>(value: T) -> f64 {
    value.to_float().to_f64().unwrap_or(f64::NAN)
}
