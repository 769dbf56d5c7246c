// image-optimizer/src/utils/format.rs
use std::time::Duration;

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Human-readable byte count. Negative values are passed through tagged
/// `[unformatted]`.
pub fn format_file_size(bytes: i64) -> String {
    if bytes < 0 {
        return format!("{} [unformatted]", bytes);
    }

    let size = bytes as f64;
    if size < KB {
        format!("{} Bytes", bytes)
    } else if size < MB {
        format!("{:.2} KB", size / KB)
    } else if size < GB {
        format!("{:.2} MB", size / MB)
    } else {
        format!("{:.2} GB", size / GB)
    }
}

/// Elapsed time between two millisecond timestamps, e.g.
/// `"1 minute, 1 second, 0 milliseconds"`.
pub fn format_duration(start_ms: u64, end_ms: u64) -> String {
    format_millis(end_ms.saturating_sub(start_ms))
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

fn format_millis(elapsed: u64) -> String {
    let hours = elapsed / 3_600_000;
    let minutes = (elapsed % 3_600_000) / 60_000;
    let seconds = (elapsed % 60_000) / 1_000;
    let millis = elapsed % 1_000;

    let mut parts = Vec::with_capacity(4);
    if hours > 0 {
        parts.push(pluralize(hours, "hour"));
    }
    if hours > 0 || minutes > 0 {
        parts.push(pluralize(minutes, "minute"));
    }
    if hours > 0 || minutes > 0 || seconds > 0 {
        parts.push(pluralize(seconds, "second"));
    }
    parts.push(pluralize(millis, "millisecond"));

    parts.join(", ")
}

fn pluralize(value: u64, unit: &str) -> String {
    if value == 1 {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}
