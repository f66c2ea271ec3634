//! Host capabilities the countdown engine depends on: a per-frame callback
//! primitive and a wall clock.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Requests a callback on the next display frame.
///
/// When the frame fires, the host hands the handle back to
/// `CountdownEngine::on_frame`.
pub trait FrameScheduler {
    fn schedule_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Scheduler whose frames fire only when the caller takes them.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    armed: Vec<FrameHandle>,
    scheduled_total: usize,
    cancelled_total: usize,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks requested and not yet fired or cancelled.
    pub fn armed(&self) -> &[FrameHandle] {
        &self.armed
    }

    /// Fires the oldest armed callback, returning its handle.
    pub fn take_next(&mut self) -> Option<FrameHandle> {
        if self.armed.is_empty() {
            None
        } else {
            Some(self.armed.remove(0))
        }
    }

    pub fn scheduled_total(&self) -> usize {
        self.scheduled_total
    }

    pub fn cancelled_total(&self) -> usize {
        self.cancelled_total
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn schedule_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.armed.push(handle);
        self.scheduled_total += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.armed.len();
        self.armed.retain(|armed| *armed != handle);
        if self.armed.len() != before {
            self.cancelled_total += 1;
        }
    }
}
