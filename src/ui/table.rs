use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use food_grid::table::DisplayTable;

const ROW_HEIGHT: f32 = 18.0;

/// Render the restaurant table under the chart.
pub fn restaurant_table(ui: &mut Ui, table: &DisplayTable) {
    ui.strong(format!("{} restaurants", table.len()));
    if table.is_empty() {
        return;
    }

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center));
    for (i, _) in table.headers.iter().enumerate() {
        // Name and tag columns get the spare width.
        let column = if i == 0 || i == 2 {
            Column::initial(180.0).at_least(80.0).clip(true)
        } else {
            Column::auto().at_least(50.0)
        };
        builder = builder.column(column);
    }

    builder
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for title in &table.headers {
                header.col(|ui: &mut Ui| {
                    ui.label(RichText::new(title).strong());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.rows.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
