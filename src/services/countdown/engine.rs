use chrono::{DateTime, Utc};

use super::models::{CountdownState, DisplayUpdate, Remaining};
use super::scheduler::{Clock, FrameHandle, FrameScheduler};
use crate::models::event::{CountdownEvent, PersistedRecord};
use crate::models::settings::CountdownSettings;
use crate::services::persistence::EventStore;
use crate::utils::date::parse_end_instant;

/// Advances a countdown to `now`.
///
/// `Expired` is terminal: once reached it is returned for every later call
/// until the caller resets the state. The boundary is strict, so a distance
/// of exactly zero still renders as a running countdown of all zeros.
pub fn tick(
    state: CountdownState,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    expired_message: &str,
) -> (String, CountdownState) {
    let Some(end) = end else {
        return (String::new(), CountdownState::Idle);
    };

    if state.is_expired() {
        return (expired_message.to_string(), CountdownState::Expired);
    }

    let distance = end.signed_duration_since(now).num_milliseconds();
    if distance < 0 {
        return (expired_message.to_string(), CountdownState::Expired);
    }

    let remaining = Remaining::from_millis(distance);
    (remaining.to_string(), CountdownState::Running(remaining))
}

/// Owns the countdown's timing state and its single frame-callback chain.
///
/// Recomputation is throttled to one per `update_interval_ms` of frame time,
/// while the remaining duration itself always comes from the wall clock so
/// missed or late frames never accumulate drift.
pub struct CountdownEngine<S: FrameScheduler, C: Clock> {
    scheduler: S,
    clock: C,
    store: EventStore,
    update_interval_ms: f64,
    expired_message: String,
    event_name: String,
    end: Option<DateTime<Utc>>,
    state: CountdownState,
    display: String,
    pending_frame: Option<FrameHandle>,
    last_update: Option<f64>,
}

impl<S: FrameScheduler, C: Clock> CountdownEngine<S, C> {
    pub fn new(scheduler: S, clock: C, store: EventStore, settings: &CountdownSettings) -> Self {
        Self {
            scheduler,
            clock,
            store,
            update_interval_ms: settings.update_interval_ms as f64,
            expired_message: settings.expired_message.clone(),
            event_name: String::new(),
            end: None,
            state: CountdownState::Idle,
            display: String::new(),
            pending_frame: None,
            last_update: None,
        }
    }

    /// Loads the persisted event and starts counting if it is complete.
    pub fn restore(&mut self) -> DisplayUpdate {
        let record = self.store.load();
        self.event_name = record.event_name.unwrap_or_default();
        self.end = record.end_date.as_deref().and_then(parse_end_instant);
        log::info!(
            "Restored countdown (name set: {}, end: {:?})",
            !self.event_name.is_empty(),
            self.end
        );
        self.rearm()
    }

    /// Replaces the event, persists it and recomputes the display at once.
    ///
    /// Counting only happens while both the name and the end are present;
    /// otherwise the engine goes idle with an empty display.
    pub fn set_event(&mut self, name: &str, end: Option<DateTime<Utc>>) -> DisplayUpdate {
        let name = name.trim();
        self.event_name = name.to_string();
        self.end = end;
        self.store
            .save_record(&PersistedRecord::for_parts(name, end));
        self.rearm()
    }

    pub fn set_event_name(&mut self, name: &str) -> DisplayUpdate {
        let end = self.end;
        self.set_event(name, end)
    }

    pub fn set_end(&mut self, end: Option<DateTime<Utc>>) -> DisplayUpdate {
        let name = self.event_name.clone();
        self.set_event(&name, end)
    }

    /// Forgets the event, both in memory and in storage.
    pub fn clear(&mut self) -> DisplayUpdate {
        self.store.clear();
        self.event_name.clear();
        self.end = None;
        self.rearm()
    }

    /// Runs one frame of the update chain.
    ///
    /// Frames whose handle is not the pending one belong to a cancelled chain
    /// and are ignored. Returns an update only when the display was actually
    /// recomputed.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp_ms: f64) -> Option<DisplayUpdate> {
        if self.pending_frame != Some(handle) {
            log::trace!("Ignoring stale frame {:?}", handle);
            return None;
        }
        self.pending_frame = None;

        if !self.state.is_running() {
            return None;
        }

        let due = self
            .last_update
            .map_or(true, |last| timestamp_ms - last >= self.update_interval_ms);

        let update = if due {
            let update = self.recompute();
            if update.state.is_running() {
                self.last_update = Some(timestamp_ms);
            }
            Some(update)
        } else {
            log::trace!("Frame at {timestamp_ms:.1}ms throttled");
            None
        };

        if self.state.is_running() {
            self.pending_frame = Some(self.scheduler.schedule_frame());
        } else {
            log::info!("Countdown for '{}' reached its end", self.event_name);
        }

        update
    }

    /// Cancels the pending frame callback, if any.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
            log::debug!("Cancelled pending frame {:?}", handle);
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// The event being counted down to, when both parts are present.
    pub fn event(&self) -> Option<CountdownEvent> {
        CountdownEvent::new(self.event_name.clone(), self.end)
    }

    pub fn is_countdown_valid(&self) -> bool {
        self.event().is_some()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Cancels the current chain, restarts from `Idle` and arms a new chain
    /// when the fresh state is running.
    fn rearm(&mut self) -> DisplayUpdate {
        self.shutdown();
        self.state = CountdownState::Idle;
        self.last_update = None;

        let update = self.recompute();
        if update.state.is_running() {
            self.pending_frame = Some(self.scheduler.schedule_frame());
        }
        log::debug!("Countdown re-armed: {:?}", update.state);
        update
    }

    fn recompute(&mut self) -> DisplayUpdate {
        let end = self.event().map(|event| event.end);
        let (text, state) = tick(self.state, end, self.clock.now(), &self.expired_message);
        self.state = state;
        self.display = text.clone();
        DisplayUpdate { text, state }
    }
}

impl<S: FrameScheduler, C: Clock> Drop for CountdownEngine<S, C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
