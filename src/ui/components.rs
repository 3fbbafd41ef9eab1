//! Reusable UI components and display formatting

use crate::page::StatusClass;
use crate::theme;
use eframe::egui;

/// Render a number the way the API sent it: whole values without a fraction.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

pub fn format_metric(value: f64) -> String {
    format_number(value)
}

pub fn format_price(price: f64) -> String {
    format!("₹{}", format_number(price))
}

pub fn format_quantity(quantity: f64) -> String {
    format!("{} units", format_number(quantity))
}

/// `veg_curry` -> `VEG CURRY`
pub fn format_item_label(item_id: &str) -> String {
    item_id.replace('_', " ").to_uppercase()
}

/// `2024-01-15` -> `January 15, 2024`; None for anything that isn't an ISO date
pub fn format_long_date(iso: &str) -> Option<String> {
    chrono::NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%B %-d, %Y").to_string())
}

pub fn status_color(class: StatusClass) -> egui::Color32 {
    match class {
        StatusClass::Checking => theme::STATUS_WARNING,
        StatusClass::Healthy => theme::STATUS_SUCCESS,
        StatusClass::Error => theme::STATUS_ERROR,
    }
}

/// Small filled dot used as the API status indicator
pub fn status_dot(ui: &mut egui::Ui, class: StatusClass, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let color = status_color(class);
        painter.circle_filled(rect.center(), size * 0.5, color.gamma_multiply(0.25));
        painter.circle_filled(rect.center(), size * 0.3, color);
    }

    response.on_hover_text(class.as_str())
}

/// `Label:  value` row inside a model card
pub fn detail_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.add(
            egui::Label::new(egui::RichText::new(label).size(theme::FONT_LABEL).color(theme::TEXT_MUTED))
                .selectable(false),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(value).size(theme::FONT_LABEL).color(theme::TEXT_PRIMARY));
        });
    });
}

pub fn section_heading(ui: &mut egui::Ui, icon: &str, title: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(format!("{}  {}", icon, title))
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_PRIMARY)
                .strong(),
        )
        .selectable(false),
    );
    ui.add_space(theme::SPACING_SM);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_label_replaces_every_underscore() {
        assert_eq!(format_item_label("veg_curry"), "VEG CURRY");
        assert_eq!(format_item_label("fish_curry_rice"), "FISH CURRY RICE");
        assert_eq!(format_item_label("maggi"), "MAGGI");
    }

    #[test]
    fn numbers_drop_trailing_zero_fraction() {
        assert_eq!(format_quantity(42.0), "42 units");
        assert_eq!(format_quantity(12.5), "12.5 units");
        assert_eq!(format_price(50.0), "₹50");
        assert_eq!(format_metric(0.6979), "0.6979");
    }

    #[test]
    fn long_date_only_for_iso_dates() {
        assert_eq!(format_long_date("2024-01-15").as_deref(), Some("January 15, 2024"));
        assert_eq!(format_long_date("2024-12-01").as_deref(), Some("December 1, 2024"));
        assert_eq!(format_long_date("yesterday"), None);
        assert_eq!(format_long_date(""), None);
    }
}
