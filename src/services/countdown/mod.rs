mod engine;
mod models;
mod scheduler;

pub use engine::{tick, CountdownEngine};
pub use models::{
    CountdownState, DisplayUpdate, Remaining, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE,
    MS_PER_SECOND,
};
pub use scheduler::{
    Clock, FrameHandle, FrameScheduler, ManualClock, ManualFrameScheduler, SystemClock,
};
