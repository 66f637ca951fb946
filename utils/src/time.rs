//! Duration formatting for countdowns shown to operators.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Format a number of seconds as its two most significant units,
/// e.g. `"1d 23h"` or `"4m 10s"`. Zero is `"0s"`.
pub fn format_duration(secs: u64) -> String {
    let units = [
        (secs / DAY, "d"),
        ((secs % DAY) / HOUR, "h"),
        ((secs % HOUR) / MINUTE, "m"),
        (secs % MINUTE, "s"),
    ];
    match units.iter().position(|(value, _)| *value > 0) {
        None => "0s".to_string(),
        Some(3) => format!("{secs}s"),
        Some(i) => format!(
            "{}{} {}{}",
            units[i].0,
            units[i].1,
            units[i + 1].0,
            units[i + 1].1
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_most_significant_units() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(250), "4m 10s");
        assert_eq!(format_duration(3_600), "1h 0m");
        assert_eq!(format_duration(172_799), "1d 23h");
        assert_eq!(format_duration(30 * DAY), "30d 0h");
    }
}
