use eframe::egui::{self, ScrollArea, Ui};

use food_grid::config::Config;
use food_grid::dashboard::Session;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FoodGridApp {
    pub state: AppState,
}

impl FoodGridApp {
    pub fn new(session: Session, config: &Config) -> Self {
        Self {
            state: AppState::new(session, config),
        }
    }
}

impl eframe::App for FoodGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart, then the optional table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    plot::restaurant_plot(ui, &self.state.view.chart);
                    if let Some(rows) = &self.state.view.table {
                        ui.separator();
                        table::restaurant_table(ui, rows);
                    }
                });
        });
    }
}
