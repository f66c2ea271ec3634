use std::fmt;

use serde::{Deserialize, Serialize};

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Whole days, hours, minutes and seconds left until the event.
///
/// Obtained purely by floor division, so the trailing milliseconds are
/// dropped and nothing ever rounds up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Decomposes a non-negative distance in milliseconds.
    pub fn from_millis(distance_ms: i64) -> Self {
        let distance_ms = distance_ms.max(0);
        Self {
            days: distance_ms / MS_PER_DAY,
            hours: (distance_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// The duration represented by the four components.
    pub fn whole_millis(&self) -> i64 {
        self.days * MS_PER_DAY
            + self.hours * MS_PER_HOUR
            + self.minutes * MS_PER_MINUTE
            + self.seconds * MS_PER_SECOND
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days, {} h, {} m, {} s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Where a countdown stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownState {
    /// No complete event to count down to.
    #[default]
    Idle,
    Running(Remaining),
    /// The end instant has passed. Terminal until a new event is set.
    Expired,
}

impl CountdownState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }

    pub fn remaining(&self) -> Option<Remaining> {
        match self {
            Self::Running(remaining) => Some(*remaining),
            _ => None,
        }
    }
}

/// Emitted every time the display is recomputed. The host refits the text
/// exactly once per update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUpdate {
    pub text: String,
    pub state: CountdownState,
}
