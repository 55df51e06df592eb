//! Millisecond conversions and clock-face formatting

/// Milliseconds in one second
pub const MS_PER_SECOND: u64 = 1000;

/// Milliseconds in one minute
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

/// Convert whole minutes to milliseconds
pub fn minutes_to_ms(minutes: u64) -> u64 {
    minutes * MS_PER_MINUTE
}

/// Convert milliseconds to whole minutes, rounding down
pub fn ms_to_minutes(ms: u64) -> u64 {
    ms / MS_PER_MINUTE
}

/// Convert milliseconds to whole seconds, rounding down
pub fn ms_to_seconds(ms: u64) -> u64 {
    ms / MS_PER_SECOND
}

/// Format a millisecond count as a zero-padded mm:ss clock face
pub fn format_clock(ms: u64) -> String {
    let minutes = ms_to_minutes(ms);
    let seconds = ms_to_seconds(ms) - minutes * 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Integer percentage of `part` within `whole`, rounding down.
/// A zero `whole` yields 0 rather than dividing by zero.
pub fn percent_of(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        0
    } else {
        (part * 100 / whole) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_minutes_and_ms() {
        assert_eq!(minutes_to_ms(25), 1_500_000);
        assert_eq!(ms_to_minutes(1_500_000), 25);
        assert_eq!(ms_to_minutes(1_499_999), 24);
    }

    #[test]
    fn formats_clock_faces() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59_000), "00:59");
        assert_eq!(format_clock(60_000), "01:00");
        assert_eq!(format_clock(754_000), "12:34");
        assert_eq!(format_clock(3_600_000), "60:00");
    }

    #[test]
    fn truncates_partial_seconds() {
        assert_eq!(format_clock(59_999), "00:59");
        assert_eq!(format_clock(1_001), "00:01");
    }

    #[test]
    fn computes_floor_percentages() {
        assert_eq!(percent_of(1_500_000, 1_500_000), 100);
        assert_eq!(percent_of(0, 1_500_000), 0);
        assert_eq!(percent_of(1_410_000, 1_500_000), 94);
        assert_eq!(percent_of(1, 0), 0);
    }
}
