use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use food_grid::chart::ColoringMode;
use food_grid::data::filter::ALL_CATEGORIES;
use food_grid::data::model::PriceTier;

use crate::state::AppState;

/// Most names listed under the highlight search box at once.
const HIGHLIGHT_LIST_LIMIT: usize = 40;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            range_controls(ui, state);
            ui.separator();

            // ---- Price ----
            ui.strong("Select Price");
            ui.horizontal(|ui: &mut Ui| {
                for tier in PriceTier::ALL {
                    let mut checked = state.controls.prices.contains(&tier);
                    if ui.checkbox(&mut checked, tier.symbol()).changed() {
                        state.toggle_price(tier);
                    }
                }
            });
            ui.separator();

            category_controls(ui, state);
            ui.separator();

            highlight_controls(ui, state);
            ui.separator();

            // ---- Colour-by selector ----
            ui.strong("Color by");
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(state.controls.coloring.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for mode in ColoringMode::ALL {
                        ui.selectable_value(&mut state.controls.coloring, mode, mode.label());
                    }
                });
            ui.checkbox(&mut state.controls.show_table, "Show restaurant table");
            ui.separator();

            let refresh = egui::Button::new(RichText::new("Refresh").color(Color32::WHITE))
                .fill(Color32::from_rgb(0x28, 0xA7, 0x45));
            if ui.add(refresh).clicked() {
                state.refresh();
            }
        });
}

fn range_controls(ui: &mut Ui, state: &mut AppState) {
    let max_reviews = state.session.dataset.max_total_reviews;
    let c = &mut state.controls;

    ui.strong("Rating Range");
    ui.add(egui::Slider::new(&mut c.rating_lo, 0..=100).step_by(1.0).text("min"));
    ui.add(egui::Slider::new(&mut c.rating_hi, 0..=100).step_by(1.0).text("max"));
    // Keep the pair ordered while dragging.
    c.rating_hi = c.rating_hi.max(c.rating_lo);

    ui.strong("Review Count Range");
    ui.add(egui::Slider::new(&mut c.review_lo, 0..=max_reviews).step_by(1.0).text("min"));
    ui.add(egui::Slider::new(&mut c.review_hi, 0..=max_reviews).step_by(1.0).text("max"));
    c.review_hi = c.review_hi.max(c.review_lo);
}

fn category_controls(ui: &mut Ui, state: &mut AppState) {
    let n_selected = state.controls.main_categories.len();
    let n_total = state.session.dataset.main_categories.len();
    let header_text = if state.controls.main_categories.contains(ALL_CATEGORIES) {
        format!("Main Category  (all {n_total})")
    } else {
        format!("Main Category  ({n_selected}/{n_total})")
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("main_category")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let entries = state.session.color_map.legend_entries();
            let all = std::iter::once((ALL_CATEGORIES.to_string(), None));
            let rows = all.chain(entries.into_iter().map(|(cat, color)| (cat, Some(color))));
            for (cat, color) in rows {
                let mut text = RichText::new(&cat);
                if let Some(color) = color {
                    text = text.color(color);
                }
                let mut checked = state.controls.main_categories.contains(&cat);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_category(&cat);
                }
            }
        });
}

fn highlight_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Highlight Restaurant(s)");
    ui.text_edit_singleline(&mut state.highlight_query);

    let candidates: Vec<String> = state
        .highlight_candidates(HIGHLIGHT_LIST_LIMIT)
        .into_iter()
        .map(str::to_string)
        .collect();

    ScrollArea::vertical()
        .id_salt("highlight_list")
        .max_height(160.0)
        .show(ui, |ui: &mut Ui| {
            for name in &candidates {
                let mut checked = state.controls.highlighted.contains(name);
                if ui.checkbox(&mut checked, name.as_str()).changed() {
                    state.toggle_highlight(name);
                }
            }
        });

    if !state.controls.highlighted.is_empty() {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label(RichText::new("Highlighted:").italics());
            let selected: Vec<String> = state.controls.highlighted.iter().cloned().collect();
            for name in selected {
                if ui.small_button(format!("{name} ✕")).clicked() {
                    state.toggle_highlight(&name);
                }
            }
        });
        if ui.small_button("Clear highlights").clicked() {
            state.controls.highlighted.clear();
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(food_grid::chart::TITLE);
        ui.separator();
        let ds = &state.session.dataset;
        ui.label(format!(
            "{} restaurants loaded ({} categories, {} tags), {} shown",
            ds.len(),
            ds.main_categories.len(),
            ds.categories.len(),
            state.view.shown
        ));
        if state.view.chart.is_placeholder() {
            ui.separator();
            ui.label(RichText::new("No restaurants match the filters").color(Color32::RED));
        }
    });
}
