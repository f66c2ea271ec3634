mod fit;
mod layout;
mod lifecycle;
mod scheduler;

pub use self::fit::EguiTextElement;
pub use self::layout::Orientation;
pub use self::scheduler::EguiFrameScheduler;

use std::cell::RefCell;
use std::rc::Rc;

use crate::services::countdown::{CountdownEngine, DisplayUpdate, SystemClock};
use crate::services::date_field::DateFieldValidator;
use crate::services::text_fit::FitOptions;

pub struct CountdownApp {
    engine: CountdownEngine<EguiFrameScheduler, SystemClock>,
    fit_options: FitOptions,
    /// Text of the event name field
    name_input: String,
    /// Text of the date field, as formatted by the validator
    date_input: String,
    date_field: DateFieldValidator,
    /// Whether the earliest accepted date follows the current UTC day
    min_today: bool,
    /// Latest value the date field emitted upstream, waiting to be applied
    emitted_date: Rc<RefCell<Option<String>>>,
    /// Size applied to both the title and the countdown text
    font_size: u32,
    needs_refit: bool,
    last_panel_size: Option<egui::Vec2>,
    orientation: Orientation,
}

impl eframe::App for CountdownApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        self.handle_exit(gl);
    }
}

impl CountdownApp {
    /// Every recomputed display asks for exactly one refit.
    fn apply_update(&mut self, update: DisplayUpdate) {
        log::trace!("Display update: {:?}", update.state);
        self.needs_refit = true;
    }

    fn drive_frame_chain(&mut self, ctx: &egui::Context) {
        let Some(handle) = self.engine.scheduler_mut().take_due() else {
            return;
        };

        let timestamp_ms = ctx.input(|input| input.time) * 1000.0;
        if let Some(update) = self.engine.on_frame(handle, timestamp_ms) {
            self.apply_update(update);
        }
    }

    fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_frame_chain(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let panel_size = ui.available_size();
            if self.last_panel_size != Some(panel_size) {
                self.orientation = Orientation::from_size(panel_size);
                self.last_panel_size = Some(panel_size);
                self.needs_refit = true;
            }

            self.render_form(ui);
            ui.separator();
            self.render_countdown(ui);
        });
    }
}
