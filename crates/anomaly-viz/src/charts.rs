//! ECharts views of a recorded stream

use anomaly_core::{Error, Numeric, Result};
use anomaly_detect::RecordingSink;
use charming::component::{Axis, Legend, Title};
use charming::element::{AxisType, ItemStyle, Label, LabelPosition};
use charming::series::{Line, Scatter};
use charming::{Chart, HtmlRenderer};
use std::path::Path;
use tracing::info;

const WIDTH: u64 = 1000;
const HEIGHT: u64 = 600;
const ANOMALY_COLOR: &str = "#d62728";

/// Titles for a chart
#[derive(Debug, Clone)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl ChartLabels {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
        }
    }

    /// Labels for a year of daily readings
    pub fn yearly() -> Self {
        Self::new("Voltage readings over one year", "Day", "Voltage (V)")
    }

    /// Labels for a live per-second feed
    pub fn realtime() -> Self {
        Self::new("Real-time voltage monitoring", "Time (s)", "Voltage (V)")
    }
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self::yearly()
    }
}

fn base_chart(labels: &ChartLabels) -> Chart {
    Chart::new()
        .title(Title::new().text(labels.title.as_str()))
        .legend(Legend::new())
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(labels.x_label.as_str()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(labels.y_label.as_str()),
        )
}

fn points(pairs: Vec<[f64; 2]>) -> Vec<Vec<f64>> {
    pairs.into_iter().map(|p| p.to_vec()).collect()
}

/// All readings as one scatter series, flagged readings as a second red one
pub fn scatter_chart<T: Numeric>(recording: &RecordingSink<T>, labels: &ChartLabels) -> Chart {
    base_chart(labels)
        .series(
            Scatter::new()
                .name("Voltage")
                .symbol_size(6.0)
                .data(points(recording.series_f64())),
        )
        .series(
            Scatter::new()
                .name("Anomaly")
                .symbol_size(10.0)
                .item_style(ItemStyle::new().color(ANOMALY_COLOR))
                .data(points(recording.anomalies_f64())),
        )
}

/// The stream as a line with each flagged reading marked and labelled "Anomaly N"
pub fn line_chart<T: Numeric>(recording: &RecordingSink<T>, labels: &ChartLabels) -> Chart {
    let mut chart = base_chart(labels).series(
        Line::new()
            .name("Voltage")
            .data(points(recording.series_f64())),
    );

    for (mark, point) in recording.anomalies().iter().zip(recording.anomalies_f64()) {
        chart = chart.series(
            Scatter::new()
                .name(mark.label())
                .symbol_size(10.0)
                .item_style(ItemStyle::new().color(ANOMALY_COLOR))
                .label(
                    Label::new()
                        .show(true)
                        .position(LabelPosition::Top)
                        .formatter("{a}"),
                )
                .data(vec![point.to_vec()]),
        );
    }
    chart
}

/// Render a chart to a standalone HTML page
pub fn render_html(chart: &Chart, title: &str) -> Result<String> {
    HtmlRenderer::new(title, WIDTH, HEIGHT)
        .render(chart)
        .map_err(|e| Error::Render(format!("{e:?}")))
}

/// Render a chart and write it to `path`
pub fn save_html(chart: &Chart, path: impl AsRef<Path>, title: &str) -> Result<()> {
    let path = path.as_ref();
    let html = render_html(chart, title)?;
    std::fs::write(path, html)?;
    info!(path = %path.display(), "chart written");
    Ok(())
}
