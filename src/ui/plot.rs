use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui, vec2};
use egui_plot::{HLine, Plot, PlotPoint, PlotUi, Points, Text, VLine};

use food_grid::chart::{
    ChartPoint, ChartSpec, HoverMode, Legend, Placeholder, ScatterChart, Tooltip,
};
use food_grid::color;

// ---------------------------------------------------------------------------
// Restaurant grid (central panel)
// ---------------------------------------------------------------------------

/// Render the chart from the last refresh.
pub fn restaurant_plot(ui: &mut Ui, chart: &ChartSpec) {
    match chart {
        ChartSpec::Placeholder(placeholder) => placeholder_view(ui, placeholder),
        ChartSpec::Scatter(scatter) => scatter_view(ui, scatter),
    }
}

fn placeholder_view(ui: &mut Ui, placeholder: &Placeholder) {
    let size = vec2(
        food_grid::chart::CANVAS_WIDTH.min(ui.available_width()),
        food_grid::chart::CANVAS_HEIGHT,
    );
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let color = ui.visuals().text_color().gamma_multiply(placeholder.opacity);
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        format!("{}\n{}", placeholder.title, placeholder.subtitle),
        FontId::proportional(26.0),
        color,
    );
}

/// Marker size → point radius in screen points.
fn marker_radius(size: f32) -> f32 {
    size * 0.5 + 1.0
}

fn scatter_view(ui: &mut Ui, chart: &ScatterChart) {
    ui.heading(chart.title);
    legend_header(ui, &chart.legend);

    let line_color = Color32::from_gray(90).gamma_multiply(0.5);

    let plot_response = Plot::new("restaurant_grid")
        .legend(egui_plot::Legend::default())
        .width(chart.width.min(ui.available_width()))
        .height(chart.height)
        .x_axis_label(RichText::new(chart.x_title).strong())
        .y_axis_label(RichText::new(chart.y_title).strong())
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for p in &chart.points {
                plot_ui.points(
                    Points::new(vec![[p.x, p.y]])
                        .name(&p.series)
                        .color(p.color)
                        .radius(marker_radius(p.size)),
                );
            }

            if let Some(q) = &chart.quadrants {
                plot_ui.vline(VLine::new(q.x_mean).color(line_color).width(1.0));
                plot_ui.hline(HLine::new(q.y_mean).color(line_color).width(1.0));
                if let Some(labels) = &q.labels {
                    for label in labels {
                        plot_ui.text(Text::new(
                            PlotPoint::new(label.x, label.y),
                            RichText::new(label.text).strong(),
                        ));
                    }
                }
            }

            let nearest = match chart.hover {
                HoverMode::Closest => nearest_point(plot_ui, &chart.points),
            };
            if let Some(p) = nearest.map(|i| &chart.points[i]) {
                plot_ui.points(
                    Points::new(vec![[p.x, p.y]])
                        .color(ring_color(p.color))
                        .filled(false)
                        .radius(marker_radius(p.size) + 3.0),
                );
            }
            nearest
        });

    if let Some(p) = plot_response.inner.map(|i| &chart.points[i]) {
        if plot_response.response.clicked() {
            ui.ctx().open_url(egui::OpenUrl::new_tab(&p.tooltip.url));
        }
        plot_response
            .response
            .on_hover_ui_at_pointer(|ui: &mut Ui| tooltip_ui(ui, &p.tooltip));
    }
}

fn ring_color(c: Color32) -> Color32 {
    if c == Color32::GRAY { Color32::DARK_GRAY } else { c }
}

/// Index of the point nearest the pointer in screen space. No distance
/// cut-off: while the pointer is over the plot some point is always picked.
fn nearest_point(plot_ui: &PlotUi, points: &[ChartPoint]) -> Option<usize> {
    let pointer = plot_ui.screen_from_plot(plot_ui.pointer_coordinate()?);
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let pos = plot_ui.screen_from_plot(PlotPoint::new(p.x, p.y));
            (i, pos.distance_sq(pointer))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

fn tooltip_ui(ui: &mut Ui, tooltip: &Tooltip) {
    ui.hyperlink_to(RichText::new(&tooltip.name).strong(), &tooltip.url);
    for (label, value) in tooltip.lines() {
        ui.label(format!("{label}: {value}"));
    }
}

fn legend_header(ui: &mut Ui, legend: &Legend) {
    match legend {
        Legend::Discrete { title, .. } => {
            ui.label(RichText::new(format!("Colored by {title}")).small());
        }
        Legend::Continuous { title, min, max } => {
            ui.label(RichText::new(title).small());
            color_bar(ui, *min, *max);
        }
    }
}

/// Horizontal gradient for the score colour scale.
fn color_bar(ui: &mut Ui, min: f64, max: f64) {
    const STEPS: usize = 60;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{min:.0}"));
        let (rect, _) = ui.allocate_exact_size(vec2(240.0, 12.0), Sense::hover());
        let step_width = rect.width() / STEPS as f32;
        for i in 0..STEPS {
            let t = i as f64 / (STEPS - 1) as f64;
            let x0 = rect.left() + i as f32 * step_width;
            let cell = egui::Rect::from_min_max(
                egui::pos2(x0, rect.top()),
                egui::pos2(x0 + step_width, rect.bottom()),
            );
            ui.painter()
                .rect_filled(cell, 0.0, color::score_color(min + t * (max - min)));
        }
        ui.label(format!("{max:.0}"));
    });
}
