//! Trading session hours in UTC.
//!
//! Handles:
//! - Regular sessions (open before close)
//! - Sessions that cross midnight UTC (open after close)
//! - Round-the-clock markets expressed as 00:00 - 23:59

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Opening and closing time of a market, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHours {
    /// Session open (inclusive).
    pub open_utc: NaiveTime,
    /// Session close (inclusive).
    pub close_utc: NaiveTime,
}

impl SessionHours {
    /// Create session hours from hour/minute pairs.
    ///
    /// Returns `None` for out-of-range components.
    pub fn from_hm(open: (u32, u32), close: (u32, u32)) -> Option<Self> {
        Some(Self {
            open_utc: NaiveTime::from_hms_opt(open.0, open.1, 0)?,
            close_utc: NaiveTime::from_hms_opt(close.0, close.1, 0)?,
        })
    }

    /// Whether the session crosses midnight UTC.
    pub fn crosses_midnight(&self) -> bool {
        self.open_utc > self.close_utc
    }

    /// Check if a UTC wall-clock time falls within the session.
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        if self.crosses_midnight() {
            time >= self.open_utc || time <= self.close_utc
        } else {
            self.open_utc <= time && time <= self.close_utc
        }
    }

    /// Check if the session is open at an instant.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.is_open_at(now.time())
    }
}
