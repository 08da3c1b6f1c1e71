use std::time::Duration;

use time::macros::format_description;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

pub mod rate_tracker;
pub mod regex;

/// Milliseconds in one of the single-letter time units `s`, `m`, `h` or `d`.
pub fn unit_to_millis(unit: &str) -> Option<u64> {
    match unit {
        "s" => Some(1000),
        "m" => Some(1000 * 60),
        "h" => Some(1000 * 60 * 60),
        "d" => Some(1000 * 60 * 60 * 24),
        _ => None,
    }
}

/// Formats a wait time for humans, e.g. `4.2s` or `3m 10s`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        let tenths = duration.as_millis().div_ceil(100);
        return format!("{}.{}s", tenths / 10, tenths % 10);
    }

    let (days, hours, minutes, seconds) = (secs / 86400, (secs / 3600) % 24, (secs / 60) % 60, secs % 60);
    let parts = [(days, "d"), (hours, "h"), (minutes, "m"), (seconds, "s")];

    parts
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Installs the global tracing subscriber. Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn tracing_init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ));

    tracing_subscriber::fmt().with_env_filter(filter).with_timer(timer).init();
}
