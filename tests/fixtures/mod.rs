// Test fixtures - reusable test data
// Provides consistent instants and engines across all test files

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use countdown_widget::models::settings::CountdownSettings;
use countdown_widget::services::countdown::{
    CountdownEngine, DisplayUpdate, ManualClock, ManualFrameScheduler,
};
use countdown_widget::services::persistence::EventStore;

pub type TestEngine = CountdownEngine<ManualFrameScheduler, ManualClock>;

/// Sample instants for testing
pub mod instants {
    use super::*;

    /// Returns Jan 1, 2030 at noon UTC
    pub fn new_year_noon_2030() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    /// Returns Feb 29, 2032 at midnight UTC (leap year)
    pub fn leap_day_2032() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2032, 2, 29, 0, 0, 0).unwrap()
    }
}

/// Engine driven by a manual clock and scheduler, starting at `now`.
pub fn engine_at(now: DateTime<Utc>, store: EventStore) -> (TestEngine, ManualClock) {
    let clock = ManualClock::new(now);
    let engine = CountdownEngine::new(
        ManualFrameScheduler::new(),
        clock.clone(),
        store,
        &CountdownSettings::default(),
    );
    (engine, clock)
}

/// Fires the next armed frame, if any.
pub fn fire(engine: &mut TestEngine, timestamp_ms: f64) -> Option<DisplayUpdate> {
    let handle = engine.scheduler_mut().take_next()?;
    engine.on_frame(handle, timestamp_ms)
}
