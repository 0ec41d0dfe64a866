use chrono::Local;
use eframe::NativeOptions;
use egui::ViewportBuilder;
use tracing::{error, info, warn};

use lunar_calendar::logging::init_logging;
use lunar_calendar::{Config, LunarCalendarApp};

// ---------- MAIN FUNCTION ----------

fn main() -> Result<(), eframe::Error> {
    if let Err(e) = init_logging() {
        eprintln!("Logging disabled: {}", e);
    }

    let config = Config::from_env().unwrap_or_else(|e| {
        warn!(target: "viewer", "Ignoring environment configuration: {}", e);
        Config::default()
    });
    let today = Local::now().date_naive();
    info!(target: "viewer", "Starting lunar calendar on {}", today);

    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Lunar Calendar")
            .with_inner_size([1080.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Lunar Calendar",
        options,
        Box::new(move |_cc| Box::new(LunarCalendarApp::new(config, today))),
    );
    if let Err(e) = &result {
        error!(target: "viewer", "Viewer exited with error: {}", e);
    }
    result
}
