// Event module
// The single event a countdown widget counts down to

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::date::format_end_instant;

/// A named, fully resolved end instant.
///
/// Only constructed from non-empty names and complete instants; partial user
/// input never produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownEvent {
    pub name: String,
    pub end: DateTime<Utc>,
}

impl CountdownEvent {
    /// Returns `None` when the name is blank or no end instant is given.
    ///
    /// # Examples
    /// ```
    /// use countdown_widget::models::event::CountdownEvent;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let end = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    /// assert!(CountdownEvent::new("Launch", Some(end)).is_some());
    /// assert!(CountdownEvent::new("  ", Some(end)).is_none());
    /// assert!(CountdownEvent::new("Launch", None).is_none());
    /// ```
    pub fn new(name: impl Into<String>, end: Option<DateTime<Utc>>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return None;
        }
        end.map(|end| Self { name, end })
    }
}

/// The event as stored in the key-value backend. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    pub event_name: Option<String>,
    pub end_date: Option<String>,
}

impl PersistedRecord {
    pub fn is_empty(&self) -> bool {
        self.event_name.is_none() && self.end_date.is_none()
    }

    /// Builds the record to save for a name and optional end instant.
    ///
    /// A blank name is left out, matching what [`CountdownEvent::new`] rejects.
    pub fn for_parts(name: &str, end: Option<DateTime<Utc>>) -> Self {
        let name = name.trim();
        Self {
            event_name: Some(name.to_string()).filter(|name| !name.is_empty()),
            end_date: end.map(format_end_instant),
        }
    }
}
