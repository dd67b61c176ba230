use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::epaint::Mesh;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::engine::{DistributionMode, OutcomeDistribution, PayloadCorrelation};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Outcome distribution – pie chart
// ---------------------------------------------------------------------------

/// Render the outcome distribution as a pie with a legend beside it.
pub fn success_pie(ui: &mut Ui, state: &AppState) {
    let Some(dist) = &state.results.distribution else {
        waiting(ui, state);
        return;
    };

    ui.strong(dist.title());

    let colors = match (&dist.mode, &state.site_colors) {
        (DistributionMode::SuccessesBySite, Some(site_colors)) => site_colors.clone(),
        _ => ColorMap::new(dist.slices.iter().map(|s| s.label.clone())),
    };

    ui.horizontal(|ui: &mut Ui| {
        let side = ui.available_height().min(ui.available_width() * 0.6).max(120.0);
        let (response, painter) = ui.allocate_painter(egui::vec2(side, side), Sense::hover());
        let center = response.rect.center();
        let radius = side * 0.45;
        draw_pie(&painter, dist, &colors, center, radius, ui.visuals().text_color());

        ui.vertical(|ui: &mut Ui| legend(ui, dist, &colors));
    });
}

fn draw_pie(
    painter: &egui::Painter,
    dist: &OutcomeDistribution,
    colors: &ColorMap,
    center: Pos2,
    radius: f32,
    text_color: Color32,
) {
    let total = dist.total();
    if total == 0 {
        painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::GRAY));
        painter.text(
            center,
            Align2::CENTER_CENTER,
            "No launches",
            FontId::proportional(14.0),
            text_color,
        );
        return;
    }

    // Start at 12 o'clock, clockwise.
    let mut start = -FRAC_PI_2;
    for slice in dist.slices.iter().filter(|s| s.count > 0) {
        let fraction = slice.count as f32 / total as f32;
        let sweep = fraction * TAU;
        painter.add(wedge(center, radius, start, sweep, colors.color_for(&slice.label)));

        let mid = start + sweep / 2.0;
        let at = center + egui::vec2(mid.cos(), mid.sin()) * radius * 0.65;
        painter.text(
            at,
            Align2::CENTER_CENTER,
            format!("{:.1}%", fraction * 100.0),
            FontId::proportional(12.0),
            Color32::BLACK,
        );
        start += sweep;
    }
}

/// Triangle fan approximating a circular sector.
fn wedge(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Shape {
    let steps = ((sweep / TAU) * 96.0).ceil().max(1.0) as u32;
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for i in 0..=steps {
        let a = start + sweep * i as f32 / steps as f32;
        mesh.colored_vertex(center + egui::vec2(a.cos(), a.sin()) * radius, color);
    }
    for i in 1..=steps {
        mesh.add_triangle(0, i, i + 1);
    }
    Shape::mesh(mesh)
}

fn legend(ui: &mut Ui, dist: &OutcomeDistribution, colors: &ColorMap) {
    let total = dist.total().max(1);
    for slice in &dist.slices {
        ui.horizontal(|ui: &mut Ui| {
            let (swatch, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
            ui.painter()
                .rect_filled(swatch, 2.0, colors.color_for(&slice.label));
            ui.label(format!(
                "{}: {} ({:.1}%)",
                slice.label,
                slice.count,
                slice.count as f64 * 100.0 / total as f64
            ));
        });
    }
}

// ---------------------------------------------------------------------------
// Payload correlation – scatter chart
// ---------------------------------------------------------------------------

/// Render payload vs. outcome, one series per booster category.
/// Successes are drawn as circles, failures as crosses.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) {
    let Some(corr) = &state.results.correlation else {
        waiting(ui, state);
        return;
    };

    ui.strong(format!(
        "Correlation between payload and success for {}",
        state.site
    ));

    let booster_colors = state.booster_colors.as_ref();

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Outcome (1 = success)")
        .include_x(state.range_low)
        .include_x(state.range_high)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in scatter_series(corr) {
                let color = booster_colors
                    .map(|c| c.color_for(&category))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let name = if category.is_empty() {
                    "(uncategorized)".to_string()
                } else {
                    category
                };

                for (outcome, shape) in [(true, MarkerShape::Circle), (false, MarkerShape::Cross)] {
                    let series: Vec<[f64; 2]> = points
                        .iter()
                        .filter(|p| p[1] == if outcome { 1.0 } else { 0.0 })
                        .copied()
                        .collect();
                    if series.is_empty() {
                        continue;
                    }
                    plot_ui.points(
                        Points::new(PlotPoints::from(series))
                            .name(&name)
                            .color(color)
                            .shape(shape)
                            .filled(true)
                            .radius(4.0),
                    );
                }
            }
        });
}

/// `(category, [payload, outcome as 0/1])` series, categories sorted.
fn scatter_series(corr: &PayloadCorrelation) -> Vec<(String, Vec<[f64; 2]>)> {
    corr.by_category()
        .into_iter()
        .map(|(category, points)| {
            let xy = points
                .iter()
                .map(|p| [p.payload_mass_kg, if p.outcome { 1.0 } else { 0.0 }])
                .collect();
            (category.to_string(), xy)
        })
        .collect()
}

fn waiting(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        if state.dataset.is_some() {
            ui.spinner();
        } else {
            ui.heading("Open a file to view launches  (File → Open…)");
        }
    });
}
