//! Human-readable formatting of durations and rates

const MILLIS_PER_SECOND: u64 = 1000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Formats milliseconds as `0s`, `0.100s`, `1m2.345s` or `1h0m0.000s`
pub fn format_duration(ms: u64) -> String {
    if ms == 0 {
        return "0s".to_string();
    }

    let hours = ms / MILLIS_PER_HOUR;
    let minutes = (ms % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let seconds = (ms % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    let millis = ms % MILLIS_PER_SECOND;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    out.push_str(&format!("{}.{:03}s", seconds, millis));
    out
}

/// Formats a success rate, or `-` when there is nothing to rate
pub fn format_success_rate(rate: Option<u8>) -> String {
    match rate {
        Some(pct) => format!("{}%", pct),
        None => "-".to_string(),
    }
}
