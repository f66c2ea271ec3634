use super::CountdownApp;
use crate::services::text_fit::{fit_text, FitElement};

/// A label measured through egui's font system.
pub struct EguiTextElement {
    ctx: egui::Context,
    text: String,
    font_size: u32,
}

impl EguiTextElement {
    pub fn new(ctx: egui::Context, text: impl Into<String>) -> Self {
        Self {
            ctx,
            text: text.into(),
            font_size: 0,
        }
    }

    /// Size the label was last rendered or measured at.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }
}

impl FitElement for EguiTextElement {
    fn measured_width(&mut self, font_size_px: u32) -> f32 {
        self.font_size = font_size_px;
        let font_id = egui::FontId::proportional(font_size_px as f32);
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(self.text.clone(), font_id, egui::Color32::WHITE)
                .size()
                .x
        })
    }

    fn apply_font_size(&mut self, font_size_px: u32) {
        self.font_size = font_size_px;
    }
}

impl CountdownApp {
    /// Recomputes the shared font size for the title and the countdown.
    pub(super) fn refit_if_needed(&mut self, ui: &egui::Ui) {
        if !self.needs_refit {
            return;
        }
        self.needs_refit = false;

        if !self.engine.is_countdown_valid() {
            return;
        }

        let ctx = ui.ctx().clone();
        let mut elements = [
            EguiTextElement::new(ctx.clone(), self.engine.event_name()),
            EguiTextElement::new(ctx, self.engine.display()),
        ];
        let size = fit_text(ui.available_width(), &mut elements, &self.fit_options);

        if size != self.font_size {
            log::debug!("Font size {} -> {}", self.font_size, size);
        }
        self.font_size = size;
    }
}
