use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use rusty_catalog::data::model::{format_price, Product};
use rusty_catalog::data::pager::PageItem;
use rusty_catalog::state::AppState;

const COLUMNS: usize = 3;

const CATEGORY_COLOR: Color32 = Color32::from_rgb(29, 78, 216);
const BRAND_COLOR: Color32 = Color32::from_rgb(126, 34, 206);
const WARRANTY_COLOR: Color32 = Color32::from_rgb(21, 128, 61);

// ---------------------------------------------------------------------------
// Product grid (central panel)
// ---------------------------------------------------------------------------

/// Render the current page of products followed by the page control.
pub fn product_grid(ui: &mut Ui, state: &mut AppState) {
    if state.visible_count() == 0 {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add_space(60.0);
            ui.label("No products match your filters.");
            if ui.button("Clear Filters").clicked() {
                state.clear_filters();
            }
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            {
                let page = state.current_page();
                ui.columns(COLUMNS, |columns: &mut [Ui]| {
                    for (i, product) in page.iter().enumerate() {
                        product_card(&mut columns[i % COLUMNS], product);
                    }
                });
            }

            if state.total_pages() > 1 {
                ui.add_space(16.0);
                pagination(ui, state);
            }
        });
}

fn product_card(ui: &mut Ui, p: &Product) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());

        ui.label(RichText::new(format!("#{}", p.product_no)).small().weak());
        ui.label(RichText::new(p.display_name()).strong().size(15.0));

        ui.horizontal_wrapped(|ui: &mut Ui| {
            badge(ui, &p.category, CATEGORY_COLOR);
            badge(ui, &p.brand, BRAND_COLOR);
            badge(ui, &p.warranty, WARRANTY_COLOR);
        });
        ui.add_space(4.0);

        egui::Grid::new(("prices", p.key()))
            .num_columns(2)
            .spacing([24.0, 4.0])
            .show(ui, |ui: &mut Ui| {
                price_cell(ui, "DP Price", p.dp_price, Some(CATEGORY_COLOR));
                price_cell(ui, "RP Price", p.rp_price, Some(WARRANTY_COLOR));
                ui.end_row();
                price_cell(ui, "MAP", p.map_price, None);
                price_cell(ui, "MRP", p.mrp_price, None);
                ui.end_row();
            });

        if let Some(url) = p.view_url() {
            ui.add_space(4.0);
            ui.hyperlink_to("View Product", url);
        }
    });
    ui.add_space(8.0);
}

fn badge(ui: &mut Ui, text: &str, color: Color32) {
    if text.is_empty() {
        return;
    }
    ui.label(
        RichText::new(text)
            .small()
            .color(color)
            .background_color(color.gamma_multiply(0.12)),
    );
}

fn price_cell(ui: &mut Ui, label: &str, value: f64, color: Option<Color32>) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small().weak());
        let mut text = RichText::new(format_price(value)).strong();
        if let Some(c) = color {
            text = text.color(c);
        }
        ui.label(text);
    });
}

// ---------------------------------------------------------------------------
// Page control
// ---------------------------------------------------------------------------

fn pagination(ui: &mut Ui, state: &mut AppState) {
    let page = state.page();
    let total = state.total_pages();

    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(page > 1, egui::Button::new("‹ Previous"))
            .clicked()
        {
            state.prev_page();
        }
        for item in state.page_items() {
            match item {
                PageItem::Page(n) => {
                    if ui.selectable_label(n == page, n.to_string()).clicked() {
                        state.set_page(n);
                    }
                }
                PageItem::Ellipsis => {
                    ui.label("…");
                }
            }
        }
        if ui
            .add_enabled(page < total, egui::Button::new("Next ›"))
            .clicked()
        {
            state.next_page();
        }
    });
}
