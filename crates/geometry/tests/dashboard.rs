//! History buffer feeding both geometry builders, as the dashboard does.

use dash_core::{HistoryBuffer, MemoryStats, SharedSnapshot};
use dash_geometry::{ChartGeometry, GaugeGeometry};

#[test]
fn partially_filled_history_charts_across_the_area() {
    let history = HistoryBuffer::new(60);
    for _ in 0..45 {
        history.add(10.0);
    }

    assert_eq!(history.count(), 45);
    let mut seen = Vec::new();
    history.for_each(|v| seen.push(v));
    assert_eq!(seen, vec![10.0; 45]);

    let mut chart = ChartGeometry::default();
    let segments = chart.update(&history, 440.0, 150.0);
    assert_eq!(segments.len(), 44);

    assert_eq!(segments[0].start.x, 0.0);
    assert!((segments[43].end.x - 440.0).abs() < 1e-3);
    for seg in segments {
        assert!(seg.end.x >= seg.start.x);
        assert_eq!(seg.start.y, 135.0);
        assert_eq!(seg.end.y, 135.0);
    }
    for pair in segments.windows(2) {
        assert!(pair[1].start.x >= pair[0].start.x);
    }
}

#[test]
fn chart_follows_the_window_as_it_scrolls() {
    let history = HistoryBuffer::new(4);
    let mut chart = ChartGeometry::default();

    history.add(0.0);
    assert!(chart.update(&history, 300.0, 100.0).is_empty());

    for v in [25.0, 50.0, 75.0, 100.0] {
        history.add(v);
    }
    // 0.0 has scrolled off; the window is 25, 50, 75, 100.
    let segments = chart.update(&history, 300.0, 100.0);
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].start.y, 75.0);
    assert_eq!(segments[2].end.y, 0.0);
    assert_eq!(segments[2].end.x, 300.0);
}

#[test]
fn gauge_tracks_snapshot_memory() {
    let snapshot = SharedSnapshot::new();
    let mut gauge = GaugeGeometry::default();

    assert!(gauge.update(snapshot.memory_percent(), 150.0, 150.0).is_empty());
    assert!(gauge.track().is_some());

    snapshot.set_memory(MemoryStats::from_totals(8, 2));
    assert_eq!(gauge.update(snapshot.memory_percent(), 150.0, 150.0).len(), 25);
}
