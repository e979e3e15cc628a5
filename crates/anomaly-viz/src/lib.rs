//! Chart rendering for monitored streams
//!
//! Turns a [`anomaly_detect::RecordingSink`] into an ECharts chart and writes
//! it as a standalone HTML page.

pub mod charts;

pub use charts::{line_chart, render_html, save_html, scatter_chart, ChartLabels};
