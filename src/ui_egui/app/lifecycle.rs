use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;

use super::{CountdownApp, EguiFrameScheduler, Orientation};
use crate::models::settings::Settings;
use crate::services::countdown::{CountdownEngine, SystemClock};
use crate::services::date_field::DateFieldValidator;
use crate::services::persistence::EventStore;
use crate::utils::date::{today_utc, STORAGE_DATE_FORMAT};

impl CountdownApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, store: EventStore) -> Self {
        let scheduler = EguiFrameScheduler::new(cc.egui_ctx.clone());
        let mut engine = CountdownEngine::new(scheduler, SystemClock, store, &settings.countdown);
        let restored = engine.restore();
        log::info!("Starting with countdown state {:?}", restored.state);

        let min_date = settings.date.min_today.then(|| today_utc(Utc::now()));
        let mut date_field = DateFieldValidator::with_min(min_date);

        let date_input = engine
            .end()
            .map(|end| end.format(STORAGE_DATE_FORMAT).to_string())
            .unwrap_or_default();
        date_field.write_value(Some(date_input.as_str()));

        let emitted_date = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&emitted_date);
        date_field.subscribe_change(move |value: &str| {
            *sink.borrow_mut() = Some(value.to_string());
        });
        date_field.subscribe_touched(|| log::trace!("Date field touched"));

        Self {
            name_input: engine.event_name().to_string(),
            engine,
            fit_options: settings.fit,
            date_input,
            date_field,
            min_today: settings.date.min_today,
            emitted_date,
            font_size: settings.fit.min_size,
            needs_refit: true,
            last_panel_size: None,
            orientation: Orientation::default(),
        }
    }

    pub(super) fn handle_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.engine.shutdown();
        log::info!("Countdown widget shutting down");
    }
}
