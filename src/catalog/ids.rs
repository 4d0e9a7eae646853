use chrono::{DateTime, Duration, SecondsFormat, Utc};

use super::repository::DesignRepository;

/// ISO-8601 UTC timestamp with millisecond precision, e.g.
/// `2025-01-01T10:00:00.000Z`.
pub fn timestamp_id(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Id for a design created at `now` that is unique within `designs`.
/// Collisions advance the timestamp one millisecond at a time.
pub fn next_design_id(now: DateTime<Utc>, designs: &DesignRepository) -> String {
    let mut at = now;
    loop {
        let id = timestamp_id(at);
        if !designs.contains(&id) {
            return id;
        }
        at += Duration::milliseconds(1);
    }
}
