use anomaly_detect::{RecordingSink, StreamMonitor, ZScoreDetector};
use anomaly_sim::{SimulationParameters, VoltageSimulator};
use anomaly_viz::{save_html, scatter_chart, ChartLabels};

#[test]
fn test_year_of_readings_written_to_disk() {
    let readings = VoltageSimulator::from_seed(SimulationParameters::daily(), 42)
        .unwrap()
        .stream(365);
    let detector = ZScoreDetector::with_threshold(30, 2.0).unwrap();
    let mut monitor = StreamMonitor::with_sink(detector, RecordingSink::new()).unwrap();
    monitor.run(readings);
    let sink = monitor.into_sink();
    assert_eq!(sink.readings().len(), 365);

    let path = std::env::temp_dir().join(format!("anomaly-viz-{}.html", std::process::id()));
    let chart = scatter_chart(&sink, &ChartLabels::yearly());
    save_html(&chart, &path, "Voltage anomalies").unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("Day"));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_unwritable_path_is_an_io_error() {
    let sink: RecordingSink<f64> = RecordingSink::new();
    let chart = scatter_chart(&sink, &ChartLabels::default());
    let err = save_html(&chart, "/nonexistent-dir/chart.html", "empty").unwrap_err();
    assert!(matches!(err, anomaly_core::Error::Io(_)));
}
