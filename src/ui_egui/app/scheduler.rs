use crate::services::countdown::{FrameHandle, FrameScheduler};

/// Frame callbacks on top of egui's repaint requests.
///
/// Requesting a frame asks egui for an immediate repaint; the app collects
/// the due handle at the top of the next `update`.
pub struct EguiFrameScheduler {
    ctx: egui::Context,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl EguiFrameScheduler {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            next_id: 0,
            pending: None,
        }
    }

    /// Takes the handle whose frame is now being painted.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for EguiFrameScheduler {
    fn schedule_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.ctx.request_repaint();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_frame_is_not_due() {
        let mut scheduler = EguiFrameScheduler::new(egui::Context::default());
        let handle = scheduler.schedule_frame();
        scheduler.cancel_frame(handle);
        assert_eq!(scheduler.take_due(), None);
    }

    #[test]
    fn test_latest_request_is_due_once() {
        let mut scheduler = EguiFrameScheduler::new(egui::Context::default());
        scheduler.schedule_frame();
        let latest = scheduler.schedule_frame();

        assert_eq!(scheduler.take_due(), Some(latest));
        assert_eq!(scheduler.take_due(), None);
    }
}
