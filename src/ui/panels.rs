use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::selection::SiteFilter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the site dropdown and payload range controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Copy what we need so we can mutate state after the widgets.
    let sites: Vec<String> = dataset.sites().iter().cloned().collect();
    let bounds = dataset.payload_bounds();

    // ---- Launch site dropdown ----
    ui.strong("Launch site");
    let mut picked: Option<SiteFilter> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.site.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            let options =
                std::iter::once(SiteFilter::AllSites).chain(sites.into_iter().map(SiteFilter::Site));
            for option in options {
                let label = option.to_string();
                if ui.selectable_label(state.site == option, label).clicked() {
                    picked = Some(option);
                }
            }
        });
    if let Some(site) = picked {
        state.set_site(site);
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let span = state.config.slider_range(bounds.min, bounds.max);
    let step = state.config.slider_step;
    let mut low = state.range_low;
    let mut high = state.range_high;

    let mut changed = ui
        .add(Slider::new(&mut low, span.clone()).step_by(step).text("from"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut high, span).step_by(step).text("to"))
        .changed();

    if low > high {
        ui.label(RichText::new("Range is inverted; it will be swapped.").weak());
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("Reset").clicked() {
            state.reset_payload_range();
            changed = false;
        }
        ui.label(RichText::new(format!("data spans {bounds}")).weak());
    });

    if changed {
        state.set_payload_range(low, high);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let shown = state
                .results
                .correlation
                .as_ref()
                .map_or(0, |c| c.len());
            ui.label(format!(
                "{} launches loaded from {}, {} in payload range",
                ds.len(),
                state.config.data_path.display(),
                shown
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path, &state.config.columns) {
            Ok(dataset) => {
                state.config.data_path = path;
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
