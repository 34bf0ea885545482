use chrono::NaiveDateTime;

/// `2025-06-09T19:50:00.452684` → `2025/06/09`. Timestamps come from
/// the articles API without an offset; anything unparsable is shown
/// as-is rather than hidden.
pub fn format_created_date(iso_string: &str) -> String {
    let trimmed = iso_string.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%Y/%m/%d").to_string())
        .unwrap_or_else(|_| iso_string.to_string())
}
