use std::cell::RefCell;

use chrono::{NaiveDate, Utc};

use super::CountdownApp;
use crate::services::countdown::{Clock, CountdownEngine, DisplayUpdate, FrameScheduler};
use crate::services::date_field::DateFieldValidator;
use crate::utils::date::{parse_end_instant, today_utc};

const FIELD_WIDTH: f32 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn from_size(size: egui::Vec2) -> Self {
        if size.x > size.y {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Feeds the value the date field emitted this frame into the engine.
///
/// `""` clears the end date; a complete date re-arms the countdown.
/// Returns `None` when nothing was emitted or the end is unchanged.
fn apply_emitted_date<S: FrameScheduler, C: Clock>(
    engine: &mut CountdownEngine<S, C>,
    emitted: &RefCell<Option<String>>,
) -> Option<DisplayUpdate> {
    let value = emitted.borrow_mut().take()?;
    let end = parse_end_instant(&value);
    if end == engine.end() {
        return None;
    }
    Some(engine.set_end(end))
}

/// Moves the field's minimum to `today` when it tracks the current day.
fn roll_min_date(field: &mut DateFieldValidator, min_today: bool, today: NaiveDate) {
    if min_today && field.min() != Some(today) {
        log::debug!("Earliest accepted date is now {today}");
        field.set_min(Some(today));
    }
}

impl CountdownApp {
    pub(super) fn render_form(&mut self, ui: &mut egui::Ui) {
        match self.orientation {
            Orientation::Landscape => {
                ui.horizontal(|ui| self.render_fields(ui));
            }
            Orientation::Portrait => {
                ui.vertical(|ui| self.render_fields(ui));
            }
        }
    }

    fn render_fields(&mut self, ui: &mut egui::Ui) {
        roll_min_date(&mut self.date_field, self.min_today, today_utc(Utc::now()));

        let name_response = ui.add(
            egui::TextEdit::singleline(&mut self.name_input)
                .hint_text("Event name")
                .desired_width(FIELD_WIDTH),
        );
        if name_response.changed() {
            let update = self.engine.set_event_name(self.name_input.trim());
            self.apply_update(update);
        }

        let mut date_text = self.date_input.clone();
        let date_response = ui.add_enabled(
            !self.date_field.is_disabled(),
            egui::TextEdit::singleline(&mut date_text)
                .hint_text("YYYY-MM-DD")
                .desired_width(FIELD_WIDTH),
        );
        if date_response.changed() {
            self.date_input = self.date_field.handle_input(&date_text);
        }
        if date_response.lost_focus() {
            self.date_field.handle_blur();
            self.date_input = self.date_field.value().to_string();
        }

        if let Some(update) = apply_emitted_date(&mut self.engine, &self.emitted_date) {
            self.apply_update(update);
        }

        if ui.button("Clear").clicked() {
            self.name_input.clear();
            self.date_input.clear();
            self.date_field.write_value(None);
            let update = self.engine.clear();
            self.apply_update(update);
        }
    }

    pub(super) fn render_countdown(&mut self, ui: &mut egui::Ui) {
        if !self.engine.is_countdown_valid() {
            ui.centered_and_justified(|ui| {
                ui.weak("Enter an event name and a date to start counting down");
            });
            return;
        }

        self.refit_if_needed(ui);
        let size = self.font_size as f32;

        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(self.engine.event_name())
                    .size(size)
                    .strong(),
            );
            ui.label(egui::RichText::new(self.engine.display()).size(size));
        });
    }
}
