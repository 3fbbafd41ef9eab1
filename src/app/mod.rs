//! App module - window state, the prediction form and the controller

mod views;

use crate::controller::{Controller, ControllerConfig};
use crate::form::PredictionForm;
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, warn};

/// User intents collected while drawing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UiAction {
    Submit,
    Refresh,
    DismissBanner,
    OpenDocs,
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Declared before `runtime` so its tasks are cancelled before the runtime drops.
    pub(crate) controller: Controller,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) form: PredictionForm,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        api: crate::api::ApiClient,
        runtime: tokio::runtime::Runtime,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let controller = Controller::new(
            api,
            cc.egui_ctx.clone(),
            runtime.handle().clone(),
            ControllerConfig::from_settings(&settings),
        );

        let mut app = Self {
            controller,
            runtime,
            form: PredictionForm::default(),
            settings,
            data_dir,
            window_pos: None,
            window_size: None,
            needs_center: false,
        };
        app.controller.start(&mut app.form);
        app
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }

    pub(crate) fn dispatch(&mut self, action: UiAction) {
        debug!(?action, "UI action");
        match action {
            UiAction::Submit => self.controller.handle_prediction_submit(&self.form),
            UiAction::Refresh => self.controller.refresh(),
            UiAction::DismissBanner => self.controller.page().remove_messages(),
            UiAction::OpenDocs => {
                let url = self.controller.api_docs_url();
                if let Err(e) = open::that(&url) {
                    warn!(error = %e, url = %url, "Failed to open API docs");
                }
            }
        }
    }

    /// Draw one frame. The page lock is held only while drawing; actions run after.
    pub(crate) fn render(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        {
            let mut page = self.controller.page();
            let now = Instant::now();
            page.expire_banner(now);
            if let Some(banner) = &page.banner {
                ctx.request_repaint_after(banner.remaining(now));
            }

            egui::TopBottomPanel::top("header")
                .frame(
                    egui::Frame::new()
                        .fill(theme::BG_ELEVATED)
                        .inner_margin(egui::Margin::symmetric(16, 10)),
                )
                .show(ctx, |ui| {
                    views::header(ui, &page, self.controller.api_base_url(), &mut actions);
                });

            egui::SidePanel::left("menu_panel")
                .exact_width(theme::SIDEBAR_WIDTH)
                .resizable(false)
                .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(egui::Margin::same(16)))
                .show(ctx, |ui| views::menu_panel(ui, &page));

            egui::CentralPanel::default()
                .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(egui::Margin::same(16)))
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().id_salt("main_scroll").show(ui, |ui| {
                        views::prediction_form(ui, &page, &mut self.form, &mut actions);
                        views::prediction_result(ui, &mut page);
                        views::model_info(ui, &page);
                        views::about(ui, &page);
                    });
                });
        }

        for action in actions {
            self.dispatch(action);
        }
    }
}
