use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};
use rusty_catalog::config::FetchConfig;
use rusty_catalog::data::model::{SortField, SortOrder};
use rusty_catalog::import::ImportSource;
use rusty_catalog::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let title = match state.active_filter_count() {
            0 => "Filters".to_string(),
            n => format!("Filters ({n})"),
        };
        ui.heading(title);
        if state.has_active_filters() && ui.small_button("✖ Clear All").clicked() {
            state.clear_filters();
        }
    });
    ui.separator();

    // Options come from the whole catalog, not from the current result.
    let facets = state.catalog().facets().clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Search ----
            let mut search = state.filters().search.clone();
            let response = ui.add(
                TextEdit::singleline(&mut search)
                    .hint_text("Search products...")
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                state.update_filters(|f| f.search = search);
            }
            ui.add_space(6.0);

            // ---- Facets ----
            let current = state.filters().clone();
            if let Some(v) = facet_combo(ui, "Category", "All Categories", &facets.categories, &current.category) {
                state.update_filters(|f| f.category = v);
            }
            if let Some(v) = facet_combo(ui, "Brand", "All Brands", &facets.brands, &current.brand) {
                state.update_filters(|f| f.brand = v);
            }
            if let Some(v) = facet_combo(ui, "Warranty", "All Warranties", &facets.warranties, &current.warranty) {
                state.update_filters(|f| f.warranty = v);
            }
            ui.separator();

            // ---- Price ranges ----
            ui.strong("DP Price Range");
            ui.horizontal(|ui: &mut Ui| {
                if let Some(v) = bound_input(ui, "Min", &current.min_dp_price) {
                    state.update_filters(|f| f.min_dp_price = v);
                }
                if let Some(v) = bound_input(ui, "Max", &current.max_dp_price) {
                    state.update_filters(|f| f.max_dp_price = v);
                }
            });
            ui.strong("RP Price Range");
            ui.horizontal(|ui: &mut Ui| {
                if let Some(v) = bound_input(ui, "Min", &current.min_rp_price) {
                    state.update_filters(|f| f.min_rp_price = v);
                }
                if let Some(v) = bound_input(ui, "Max", &current.max_rp_price) {
                    state.update_filters(|f| f.max_rp_price = v);
                }
            });
            ui.separator();

            // ---- Sorting ----
            ui.strong("Sort By");
            egui::ComboBox::from_id_salt("sort_by")
                .selected_text(current.sort_by.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for field in SortField::ALL {
                        if ui
                            .selectable_label(current.sort_by == field, field.label())
                            .clicked()
                        {
                            state.update_filters(|f| f.sort_by = field);
                        }
                    }
                });
            ui.horizontal(|ui: &mut Ui| {
                for (order, label) in [(SortOrder::Asc, "Asc"), (SortOrder::Desc, "Desc")] {
                    if ui
                        .selectable_label(current.sort_order == order, label)
                        .clicked()
                    {
                        state.update_filters(|f| f.sort_order = order);
                    }
                }
            });
        });
}

/// Combo box over one facet. Returns the new constraint when the user picked
/// something (`""` for the "all" entry).
fn facet_combo(
    ui: &mut Ui,
    label: &str,
    all_label: &str,
    options: &[String],
    current: &str,
) -> Option<String> {
    let mut picked = None;
    ui.strong(label);
    let selected_text = if current.is_empty() { all_label } else { current };
    egui::ComboBox::from_id_salt(label)
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_empty(), all_label).clicked() {
                picked = Some(String::new());
            }
            for option in options {
                if ui
                    .selectable_label(current == option.as_str(), option.as_str())
                    .clicked()
                {
                    picked = Some(option.clone());
                }
            }
        });
    ui.add_space(4.0);
    picked
}

/// Text box for one price bound. Returns the edited text when it changed.
fn bound_input(ui: &mut Ui, hint: &str, value: &str) -> Option<String> {
    let mut text = value.to_string();
    let response = ui.add(
        TextEdit::singleline(&mut text)
            .hint_text(hint)
            .desired_width(90.0),
    );
    response.changed().then_some(text)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, config: &FetchConfig) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(!state.is_loading(), egui::Button::new("Open…"))
                .clicked()
            {
                open_file_dialog(state, config);
                ui.close_menu();
            }
        });

        ui.separator();
        sheet_link_input(ui, state, config);
        ui.separator();

        if state.is_loading() {
            ui.spinner();
            ui.label("Loading your catalog...");
        } else if !state.catalog().is_empty() {
            ui.label(format!(
                "{} products loaded, {} shown",
                state.catalog().len(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn sheet_link_input(ui: &mut Ui, state: &mut AppState, config: &FetchConfig) {
    let enabled = !state.is_loading();
    ui.label("Google Sheet:");
    ui.add_enabled(
        enabled,
        TextEdit::singleline(&mut state.sheet_link)
            .hint_text("https://docs.google.com/spreadsheets/d/...")
            .desired_width(320.0),
    );
    let has_link = !state.sheet_link.trim().is_empty();
    if ui
        .add_enabled(enabled && has_link, egui::Button::new("⬇ Load"))
        .clicked()
    {
        let link = state.sheet_link.trim().to_string();
        state.begin_import(ImportSource::SharedSheet(link), config);
    }
}

// ---------------------------------------------------------------------------
// Upload prompt (empty catalog)
// ---------------------------------------------------------------------------

/// Render the "get started" prompt shown while no catalog is loaded.
pub fn upload_panel(ui: &mut Ui, state: &mut AppState, config: &FetchConfig) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(60.0);
        ui.heading("Get Started");
        ui.label("Upload an Excel or CSV file to import your product catalog.");
        ui.add_space(12.0);

        if state.is_loading() {
            ui.spinner();
            ui.label("Loading your catalog...");
        } else if ui
            .add_sized([180.0, 32.0], egui::Button::new("⬆ Upload File"))
            .clicked()
        {
            open_file_dialog(state, config);
        }
        ui.label(RichText::new(".xlsx, .xls, .csv").small().weak());

        if let Some(msg) = &state.status_message {
            ui.add_space(8.0);
            ui.label(RichText::new(msg).color(Color32::RED));
        }

        ui.add_space(24.0);
        ui.group(|ui: &mut Ui| {
            ui.strong("Required columns:");
            ui.label(
                "id, product_no, category, brand, name, warranty, \
                 dp_price, rp_price, map_price, mrp_price, url",
            );
        });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, config: &FetchConfig) {
    let file = rfd::FileDialog::new()
        .set_title("Open product catalog")
        .add_filter("Catalog files", &["xlsx", "xls", "csv"])
        .add_filter("Excel", &["xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON rows", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.begin_import(ImportSource::File(path), config);
    }
}
