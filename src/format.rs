//! Timestamp display formatting

use chrono::format::{Item, StrftimeItems};
use chrono::{Local, Utc};

use crate::api::Timestamp;

/// Default strftime pattern for note timestamps
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How note timestamps are shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    local: bool,
}

impl DateFormat {
    /// Create a format from a strftime pattern.
    ///
    /// An invalid pattern is logged and replaced by [`DEFAULT_TIMESTAMP_FORMAT`].
    pub fn new(pattern: &str, local: bool) -> Self {
        let pattern = if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            tracing::warn!(
                "Invalid timestamp format {:?}, using {:?}",
                pattern,
                DEFAULT_TIMESTAMP_FORMAT
            );
            DEFAULT_TIMESTAMP_FORMAT.to_string()
        } else {
            pattern.to_string()
        };

        Self { pattern, local }
    }

    /// Format in UTC regardless of the host timezone
    pub fn utc(pattern: &str) -> Self {
        Self::new(pattern, false)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, timestamp: &Timestamp) -> String {
        let dt = timestamp.as_datetime();
        if self.local {
            dt.with_timezone(&Local).format(&self.pattern).to_string()
        } else {
            dt.with_timezone(&Utc).format(&self.pattern).to_string()
        }
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            local: true,
        }
    }
}
