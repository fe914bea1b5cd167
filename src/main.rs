mod app;
mod state;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui;

use app::FoodGridApp;
use food_grid::chart::TITLE;
use food_grid::config::Config;
use food_grid::dashboard::Session;
use food_grid::data::loader::load_source;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::parse();

    // The colour map and every control's choices derive from the full
    // table, so a load failure ends the program before the window opens.
    let dataset = load_source(&config.source()).inspect_err(|e| {
        log::error!("Failed to load dataset: {e:#}");
    })?;
    let app = FoodGridApp::new(Session::new(dataset), &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("running the UI: {e}"))
}
