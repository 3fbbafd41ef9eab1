//! View rendering (header, menu, model cards, prediction form and result)
//!
//! These functions only read the view model and the form inputs. Anything
//! that needs the controller is pushed as a `UiAction` and dispatched after
//! the page lock is released.

use super::UiAction;
use crate::constants::*;
use crate::form::PredictionForm;
use crate::page::{BannerKind, CardBody, PageState};
use crate::theme;
use crate::ui::components::{detail_row, format_price, section_heading, status_dot, status_color};
use eframe::egui;
use egui_phosphor::regular as icons;

pub(crate) fn header(ui: &mut egui::Ui, page: &PageState, api_url: &str, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.add(
            egui::Label::new(
                egui::RichText::new(format!("{}  CANTEEN MENU OPTIMIZER", icons::BOWL_FOOD))
                    .size(theme::FONT_TITLE)
                    .color(theme::TEXT_PRIMARY)
                    .strong(),
            )
            .selectable(false),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add(theme::button(format!("{}  API Docs", icons::BOOK_OPEN)))
                .on_hover_text(api_url)
                .clicked()
            {
                actions.push(UiAction::OpenDocs);
            }
            if ui.add(theme::button(format!("{}  Refresh", icons::ARROWS_CLOCKWISE))).clicked() {
                actions.push(UiAction::Refresh);
            }
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new(&page.status.message)
                    .size(theme::FONT_LABEL)
                    .color(status_color(page.status.class)),
            );
            status_dot(ui, page.status.class, 12.0);
        });
    });
}

pub(crate) fn menu_panel(ui: &mut egui::Ui, page: &PageState) {
    section_heading(ui, icons::LIST_BULLETS, "Menu Items");

    if page.menu_items.is_empty() {
        ui.label(egui::RichText::new("No menu items loaded").color(theme::TEXT_DIM));
        return;
    }

    egui::ScrollArea::vertical().id_salt("menu_scroll").show(ui, |ui| {
        for item in &page.menu_items {
            theme::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&item.name)
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_PRIMARY)
                            .strong(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(egui::RichText::new(format_price(item.price)).color(theme::ACCENT));
                    });
                });
                ui.label(egui::RichText::new(&item.id).size(theme::FONT_SMALL).color(theme::TEXT_DIM));
            });
            ui.add_space(theme::SPACING_SM);
        }
    });
}

pub(crate) fn prediction_form(
    ui: &mut egui::Ui,
    page: &PageState,
    form: &mut PredictionForm,
    actions: &mut Vec<UiAction>,
) {
    section_heading(ui, icons::CHART_LINE_UP, "Demand Prediction");

    page.retain_selection(form);

    let mut enter_pressed = false;
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::Grid::new("prediction_form")
            .num_columns(2)
            .spacing([theme::SPACING_LG, theme::SPACING_MD])
            .show(ui, |ui| {
                ui.label("Date");
                enter_pressed |= text_field(ui, &mut form.date, "YYYY-MM-DD");
                ui.end_row();

                ui.label("Menu item");
                let selected = page.option_label(&form.item_id).unwrap_or(ITEM_PLACEHOLDER).to_string();
                egui::ComboBox::from_id_salt("item_select")
                    .selected_text(selected)
                    .width(220.0)
                    .show_ui(ui, |ui| {
                        for option in &page.item_options {
                            ui.selectable_value(&mut form.item_id, option.value.clone(), option.label.as_str());
                        }
                    });
                ui.end_row();

                ui.label("Current stock");
                enter_pressed |= text_field(ui, &mut form.current_stock, "optional");
                ui.end_row();

                ui.label("Rainfall today (mm)");
                enter_pressed |= text_field(ui, &mut form.rainfall_today, "optional");
                ui.end_row();

                ui.label("Student count");
                enter_pressed |= text_field(ui, &mut form.student_count, "optional");
                ui.end_row();

                ui.label("Event today");
                ui.checkbox(&mut form.event_today, "Special event on campus");
                ui.end_row();
            });

        ui.add_space(theme::SPACING_MD);
        ui.horizontal(|ui| {
            let button = ui.add_enabled(
                !page.submit.disabled,
                theme::button_accent(page.submit.label.clone()).min_size(egui::vec2(180.0, theme::BUTTON_HEIGHT_LARGE)),
            );
            if page.submit.disabled {
                ui.spinner();
            }
            if button.clicked() || (enter_pressed && !page.submit.disabled) {
                actions.push(UiAction::Submit);
            }
        });

        if let Some(banner) = &page.banner {
            ui.add_space(theme::SPACING_MD);
            let (icon, color) = match banner.kind {
                BannerKind::Success => (icons::CHECK_CIRCLE, theme::STATUS_SUCCESS),
                BannerKind::Error => (icons::WARNING, theme::STATUS_ERROR),
            };
            egui::Frame::new()
                .fill(color.gamma_multiply(0.12))
                .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, color))
                .corner_radius(theme::RADIUS_DEFAULT)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(format!("{}  {}", icon, banner.message)).color(color));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button(icons::X).clicked() {
                                actions.push(UiAction::DismissBanner);
                            }
                        });
                    });
                });
        }
    });
}

/// Single-line input; returns true when Enter was pressed in it.
fn text_field(ui: &mut egui::Ui, value: &mut String, hint: &str) -> bool {
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(220.0),
    );
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

pub(crate) fn prediction_result(ui: &mut egui::Ui, page: &mut PageState) {
    if !page.result_visible {
        return;
    }
    let Some(result) = page.result.clone() else {
        return;
    };

    ui.add_space(theme::SPACING_XL);
    let response = theme::card_frame()
        .stroke(egui::Stroke::new(theme::STROKE_MEDIUM, theme::ACCENT))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            section_heading(ui, icons::TARGET, "Prediction Result");
            if let Some(date) = &result.date {
                ui.label(egui::RichText::new(date).color(theme::TEXT_MUTED));
            }
            ui.label(
                egui::RichText::new(&result.item)
                    .size(theme::FONT_HEADING)
                    .color(theme::TEXT_PRIMARY),
            );
            ui.label(
                egui::RichText::new(&result.quantity)
                    .size(28.0)
                    .color(theme::ACCENT)
                    .strong(),
            );
            detail_row(ui, "Model version", &result.version);
        })
        .response;

    if page.take_scroll_request() {
        response.scroll_to_me(Some(egui::Align::TOP));
    }
}

pub(crate) fn model_info(ui: &mut egui::Ui, page: &PageState) {
    if page.model_cards.is_empty() {
        return;
    }
    ui.add_space(theme::SPACING_XL);
    section_heading(ui, icons::INFO, "Model Information");

    ui.columns(page.model_cards.len(), |columns| {
        for (ui, card) in columns.iter_mut().zip(&page.model_cards) {
            theme::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    egui::RichText::new(format!("{}  {}", card.icon, card.title))
                        .color(theme::TEXT_PRIMARY)
                        .strong(),
                );
                ui.add_space(theme::SPACING_SM);
                match &card.body {
                    CardBody::Details(rows) => {
                        for (label, value) in rows {
                            detail_row(ui, &format!("{}:", label), value);
                        }
                    }
                    CardBody::List(entries) => {
                        for entry in entries {
                            ui.label(egui::RichText::new(format!("•  {}", entry)).size(theme::FONT_LABEL));
                        }
                    }
                }
            });
        }
    });
}

pub(crate) fn about(ui: &mut egui::Ui, page: &PageState) {
    let Some(info) = &page.api_info else {
        return;
    };
    ui.add_space(theme::SPACING_XL);
    egui::CollapsingHeader::new(format!("{}  About the API", icons::QUESTION))
        .id_salt("about_api")
        .default_open(false)
        .show(ui, |ui| {
            if !info.message.is_empty() {
                detail_row(ui, "Service", &info.message);
            }
            if !info.version.is_empty() {
                detail_row(ui, "Version", &info.version);
            }
            for feature in &info.features {
                ui.label(egui::RichText::new(format!("•  {}", feature)).size(theme::FONT_LABEL));
            }
            if !info.endpoints.is_empty() {
                ui.add_space(theme::SPACING_SM);
                for (endpoint, description) in &info.endpoints {
                    detail_row(ui, endpoint, description);
                }
            }
        });
}
