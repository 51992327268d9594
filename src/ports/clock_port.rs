//! Time source port trait.

use chrono::{DateTime, Utc};

/// Supplies the timestamp assigned to each recorded trade and the "now"
/// that trailing windows are measured back from.
pub trait ClockPort {
    fn now(&self) -> DateTime<Utc>;
}
