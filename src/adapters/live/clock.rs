//! System clock adapter.

use chrono::{DateTime, Utc};

use crate::ports::Clock;

/// Reads the wall clock on every call.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
