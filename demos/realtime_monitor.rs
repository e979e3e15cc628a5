//! Thirty seconds of a live voltage feed through the streaming detector
//!
//! Each reading is printed as it arrives, one per second by default. Set
//! `pacing_ms` to 0 in a config file to run without delay.

use anyhow::Result;
use stream_anomaly::prelude::*;
use tracing_subscriber::EnvFilter;

/// Prints every reading and its verdict as it arrives
struct ConsoleSink;

impl DetectionSink<f64> for ConsoleSink {
    fn record(&mut self, index: usize, value: f64, verdict: &Verdict<f64>) {
        println!("t={index:>3}s  {value:>7.2} V  {verdict}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let config = MonitorConfig::from_env_or(MonitorConfig::realtime())?;
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "realtime_voltage.html".to_string());

    let (summary, (recording, _console)) =
        config.run_with_sink((RecordingSink::new(), ConsoleSink))?;

    let chart = line_chart(&recording, &ChartLabels::realtime());
    save_html(&chart, &output, "Real-time voltage anomalies")?;

    println!("{summary}");
    println!("Chart written to {output}");
    Ok(())
}
