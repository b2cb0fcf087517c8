use dash_core::MetricsSnapshot;

/// Format a byte count as a human-readable string (e.g. `"7.3 GiB"`).
pub fn format_bytes(bytes: u64) -> String {
    const GIB: u64 = 1 << 30;
    const MIB: u64 = 1 << 20;
    const KIB: u64 = 1 << 10;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Percentage label shown in the middle of the gauge, e.g. `"42.5%"`.
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// `used / total` memory label, e.g. `"3.2 GiB / 15.5 GiB"`.
pub fn memory_label(snapshot: &MetricsSnapshot) -> String {
    format!(
        "{} / {}",
        format_bytes(snapshot.memory_used),
        format_bytes(snapshot.memory_total)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_gib() {
        assert_eq!(format_bytes(8 * 1024 * 1024 * 1024), "8.0 GiB");
    }

    #[test]
    fn format_bytes_mib() {
        assert_eq!(format_bytes(512 * 1024 * 1024), "512.0 MiB");
    }

    #[test]
    fn format_bytes_zero() {
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(42.46), "42.5%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn memory_label_pairs_used_and_total() {
        let snap = MetricsSnapshot {
            memory_used:  3 * 1024 * 1024 * 1024,
            memory_total: 16 * 1024 * 1024 * 1024,
            ..MetricsSnapshot::default()
        };
        assert_eq!(memory_label(&snap), "3.0 GiB / 16.0 GiB");
    }
}
