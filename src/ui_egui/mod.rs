mod app;

pub use app::{CountdownApp, EguiFrameScheduler, EguiTextElement, Orientation};
