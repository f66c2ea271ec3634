// Countdown Widget
// Main entry point

use countdown_widget::services::persistence::{open_event_store, EventStore};
use countdown_widget::services::settings::SettingsService;
use countdown_widget::ui_egui::CountdownApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Countdown Widget");

    let settings_service = SettingsService::from_environment();
    let settings = settings_service.get_or_default();
    log::info!(
        "Loaded settings from {}: fit={:?}, storage={:?}",
        settings_service.path().display(),
        settings.fit,
        settings.storage.backend
    );

    let store = open_event_store(&settings.storage).unwrap_or_else(|err| {
        log::warn!("Failed to open event storage: {err:#}; falling back to memory");
        EventStore::in_memory()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Countdown")
            .with_inner_size([640.0, 360.0])
            .with_min_inner_size([240.0, 160.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Countdown",
        options,
        Box::new(move |cc| Ok(Box::new(CountdownApp::new(cc, settings, store)))),
    )
}
