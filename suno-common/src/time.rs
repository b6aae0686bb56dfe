//! Timestamp utilities
//!
//! Stored timestamps use local time so that files written by the services
//! read naturally next to the rest of the user's data.

use chrono::{DateTime, Local};

/// Format used for `createdAt`, `updatedAt` and generation timestamps
const ISO_MICROS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Format used for timestamp-derived project ids
const PROJECT_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Get current local timestamp
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Current local time as ISO-8601 with microsecond precision
/// (e.g. `2025-01-31T14:03:59.123456`)
pub fn iso_timestamp() -> String {
    format_iso(&now())
}

/// Format a timestamp as ISO-8601 with microsecond precision
pub fn format_iso(at: &DateTime<Local>) -> String {
    at.format(ISO_MICROS_FORMAT).to_string()
}

/// Default project id for the current local time (e.g. `20250131_140359`)
pub fn default_project_id() -> String {
    now().format(PROJECT_ID_FORMAT).to_string()
}
