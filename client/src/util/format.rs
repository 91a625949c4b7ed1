//! Display formatting for prices and timestamps.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// `1250` -> `"$12.50"`. Negative amounts keep their sign in front.
#[must_use]
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

/// Date part of an RFC 3339 timestamp (`2026-03-01T10:00:00Z` -> `2026-03-01`).
#[must_use]
pub fn format_date(timestamp: &str) -> &str {
    timestamp.split_once('T').map_or(timestamp, |(date, _)| date)
}

/// First eight characters of an id, for compact table cells.
#[must_use]
pub fn short_id(id: &uuid::Uuid) -> String {
    id.simple().to_string()[..8].to_owned()
}
