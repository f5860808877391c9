//! Clock-face formatting helpers

use std::time::Duration;

/// Split a second count into (hours, minutes, seconds)
pub fn split_hms(total_seconds: u64) -> (u64, u64, u64) {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    (hours, minutes, seconds)
}

/// Format a second count as `HH:MM:SS`, each part zero-padded to two digits
pub fn format_hms(total_seconds: u64) -> String {
    let (hours, minutes, seconds) = split_hms(total_seconds);
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Compact human uptime such as `1h 2m 3s`
pub fn format_uptime(elapsed: Duration) -> String {
    let (hours, minutes, seconds) = split_hms(elapsed.as_secs());

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_hms(0), "00:00:00");
    }

    #[test]
    fn rederives_components_from_total() {
        assert_eq!(format_hms(90 * 60), "01:30:00");
        assert_eq!(format_hms(3600 + 61), "01:01:01");
        assert_eq!(format_hms(12 * 3600 + 60 * 60 + 60), "13:01:00");
    }

    #[test]
    fn hours_are_not_truncated() {
        assert_eq!(format_hms(100 * 3600 + 5), "100:00:05");
    }

    #[test]
    fn uptime_drops_leading_zero_units() {
        assert_eq!(format_uptime(Duration::from_secs(5)), "5s");
        assert_eq!(format_uptime(Duration::from_secs(65)), "1m 5s");
        assert_eq!(format_uptime(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
