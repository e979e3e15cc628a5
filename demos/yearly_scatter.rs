//! A year of simulated daily voltage readings through the windowed z-score detector
//!
//! Writes `yearly_voltage.html` (or the path given as the first argument) with
//! every reading and the flagged days highlighted.
//!
//! ```sh
//! RUST_LOG=info cargo run --example yearly_scatter
//! STREAM_ANOMALY_CONFIG=run.json cargo run --example yearly_scatter -- out.html
//! ```

use anyhow::Result;
use stream_anomaly::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = MonitorConfig::from_env_or(MonitorConfig::daily())?;
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "yearly_voltage.html".to_string());

    let (summary, (recording, _alerts)) =
        config.run_with_sink((RecordingSink::new(), AlertSink::new("V")))?;

    let chart = scatter_chart(&recording, &ChartLabels::yearly());
    save_html(&chart, &output, "Voltage anomalies")?;

    println!("{summary}");
    println!("Chart written to {output}");
    Ok(())
}
