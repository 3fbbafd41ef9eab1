//! View model drawn by the UI every frame.
//!
//! Background tasks write here through `Arc<Mutex<PageState>>`; the egui
//! update loop only reads it (plus banner expiry and scroll requests).

use crate::constants::*;
use crate::form::PredictionForm;
use crate::types::*;
use crate::ui::components::{format_item_label, format_long_date, format_metric, format_quantity};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Checking,
    Healthy,
    Error,
}

impl StatusClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Checking => "checking",
            StatusClass::Healthy => "healthy",
            StatusClass::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusIndicator {
    pub class: StatusClass,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardBody {
    Details(Vec<(&'static str, String)>),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: CardBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDisplay {
    pub item: String,
    pub quantity: String,
    pub version: String,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient message attached to the prediction form
#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub shown_at: Instant,
    pub ttl: Duration,
}

impl Banner {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.ttl.saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            label: SUBMIT_LABEL.to_string(),
            disabled: false,
        }
    }
}

pub struct PageState {
    pub status: StatusIndicator,
    pub menu_items: Vec<MenuItem>,
    pub item_options: Vec<SelectOption>,
    pub model_cards: Vec<ModelCard>,
    pub api_info: Option<ApiInfo>,
    pub result: Option<PredictionDisplay>,
    pub result_visible: bool,
    pub scroll_to_result: bool,
    pub banner: Option<Banner>,
    pub submit: SubmitControl,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            status: StatusIndicator {
                class: StatusClass::Checking,
                message: "Checking API status...".to_string(),
            },
            menu_items: Vec::new(),
            item_options: vec![placeholder_option()],
            model_cards: Vec::new(),
            api_info: None,
            result: None,
            result_visible: false,
            scroll_to_result: false,
            banner: None,
            submit: SubmitControl::default(),
        }
    }
}

fn placeholder_option() -> SelectOption {
    SelectOption {
        value: String::new(),
        label: ITEM_PLACEHOLDER.to_string(),
    }
}

impl PageState {
    pub fn update_api_status(&mut self, class: StatusClass, message: impl Into<String>) {
        self.status = StatusIndicator {
            class,
            message: message.into(),
        };
    }

    pub fn display_menu_items(&mut self, items: &[MenuItem]) {
        self.menu_items = items.to_vec();
    }

    /// Rebuild the item selector: placeholder first, then one option per item.
    pub fn populate_item_select(&mut self, items: &[MenuItem]) {
        self.item_options = std::iter::once(placeholder_option())
            .chain(items.iter().map(|item| SelectOption {
                value: item.id.clone(),
                label: item.name.clone(),
            }))
            .collect();
    }

    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.item_options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    /// Clear a selection that is not among the current options.
    pub fn retain_selection(&self, form: &mut PredictionForm) {
        if self.option_label(&form.item_id).is_none() {
            form.item_id.clear();
        }
    }

    pub fn display_model_info(&mut self, info: &ModelInfo) {
        let ml = &info.ml_model;
        let rl = &info.rl_model;
        self.model_cards = vec![
            ModelCard {
                icon: egui_phosphor::regular::BRAIN,
                title: "Machine Learning Model",
                body: CardBody::Details(vec![
                    ("Type", ml.model_type.clone()),
                    ("Features", ml.features.to_string()),
                    ("RMSE", format_metric(ml.performance.rmse)),
                    ("MAE", format_metric(ml.performance.mae)),
                    ("R² Score", format_metric(ml.performance.r2_score)),
                ]),
            },
            ModelCard {
                icon: egui_phosphor::regular::ROBOT,
                title: "Reinforcement Learning Model",
                body: CardBody::Details(vec![
                    ("Type", rl.model_type.clone()),
                    ("State Size", rl.state_size.to_string()),
                    ("Action Size", rl.action_size.to_string()),
                    ("Episodes Trained", rl.episodes_trained.to_string()),
                ]),
            },
            ModelCard {
                icon: egui_phosphor::regular::KEY,
                title: "Key Features",
                body: CardBody::List(info.key_features.clone()),
            },
        ];
    }

    pub fn display_api_info(&mut self, info: ApiInfo) {
        self.api_info = Some(info);
    }

    pub fn display_prediction_result(&mut self, result: &PredictionResult, date: Option<&str>) {
        self.result = Some(PredictionDisplay {
            item: format_item_label(&result.item_id),
            quantity: format_quantity(result.predicted_quantity),
            version: result.model_version.clone(),
            date: date.and_then(format_long_date),
        });
        self.result_visible = true;
        self.scroll_to_result = true;
    }

    /// Consume a pending scroll-into-view request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_result)
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.show_banner(BannerKind::Error, message.into(), ERROR_BANNER_TTL);
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.show_banner(BannerKind::Success, message.into(), SUCCESS_BANNER_TTL);
    }

    fn show_banner(&mut self, kind: BannerKind, message: String, ttl: Duration) {
        self.remove_messages();
        self.banner = Some(Banner {
            kind,
            message,
            shown_at: Instant::now(),
            ttl,
        });
    }

    pub fn remove_messages(&mut self) {
        self.banner = None;
    }

    /// Drop the banner once its lifetime has elapsed. Returns true if removed.
    pub fn expire_banner(&mut self, now: Instant) -> bool {
        if self.banner.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.banner = None;
            return true;
        }
        false
    }

    pub fn set_submit_busy(&mut self) {
        self.submit = SubmitControl {
            label: SUBMIT_BUSY_LABEL.to_string(),
            disabled: true,
        };
    }

    pub fn restore_submit(&mut self) {
        self.submit = SubmitControl::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<MenuItem> {
        (0..n)
            .map(|i| MenuItem {
                id: format!("item_{i}"),
                name: format!("Item {i}"),
                price: 10.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn selector_has_placeholder_plus_items() {
        let mut page = PageState::default();
        page.populate_item_select(&items(4));
        assert_eq!(page.item_options.len(), 5);
        assert_eq!(page.item_options[0].label, ITEM_PLACEHOLDER);
        assert_eq!(page.item_options[0].value, "");
        assert_eq!(page.option_label("item_2"), Some("Item 2"));

        page.populate_item_select(&items(1));
        assert_eq!(page.item_options.len(), 2);
        assert_eq!(page.option_label("item_2"), None);
    }

    #[test]
    fn selection_survives_only_if_still_listed() {
        let mut page = PageState::default();
        page.populate_item_select(&items(3));
        let mut form = PredictionForm {
            item_id: "item_1".into(),
            ..Default::default()
        };

        page.populate_item_select(&items(2));
        page.retain_selection(&mut form);
        assert_eq!(form.item_id, "item_1");

        page.populate_item_select(&items(1));
        page.retain_selection(&mut form);
        assert_eq!(form.item_id, "");
        assert_eq!(page.option_label(&form.item_id), Some(ITEM_PLACEHOLDER));
    }

    #[test]
    fn only_one_banner_at_a_time() {
        let mut page = PageState::default();
        page.show_error("first");
        assert_eq!(page.banner.as_ref().unwrap().ttl, ERROR_BANNER_TTL);
        page.show_success("second");
        let banner = page.banner.as_ref().unwrap();
        assert_eq!(banner.kind, BannerKind::Success);
        assert_eq!(banner.message, "second");
        assert_eq!(banner.ttl, SUCCESS_BANNER_TTL);
    }

    #[test]
    fn banner_expires_after_ttl() {
        let mut page = PageState::default();
        page.show_error("boom");
        let shown_at = page.banner.as_ref().unwrap().shown_at;
        assert!(!page.expire_banner(shown_at + Duration::from_secs(4)));
        assert!(page.banner.is_some());
        assert!(page.expire_banner(shown_at + ERROR_BANNER_TTL));
        assert!(page.banner.is_none());
    }

    #[test]
    fn prediction_result_is_formatted() {
        let mut page = PageState::default();
        page.display_prediction_result(
            &PredictionResult {
                item_id: "fish_curry_rice".into(),
                predicted_quantity: 42.0,
                model_version: "v1.2".into(),
            },
            Some("2024-01-15"),
        );
        let shown = page.result.clone().unwrap();
        assert_eq!(shown.item, "FISH CURRY RICE");
        assert_eq!(shown.quantity, "42 units");
        assert_eq!(shown.version, "v1.2");
        assert_eq!(shown.date.as_deref(), Some("January 15, 2024"));
        assert!(page.result_visible);
        assert!(page.take_scroll_request());
        assert!(!page.take_scroll_request());
    }

    #[test]
    fn model_cards_replace_previous_content() {
        let info = ModelInfo {
            ml_model: MlModel {
                model_type: "XGBoost Regressor".into(),
                features: 30,
                performance: Performance {
                    rmse: 34.39,
                    mae: 26.55,
                    r2_score: 0.6979,
                },
            },
            rl_model: RlModel {
                model_type: "Q-Learning".into(),
                state_size: 64,
                action_size: 11,
                episodes_trained: 150,
            },
            key_features: vec!["is_weekend".into(), "day_of_week".into()],
        };
        let mut page = PageState::default();
        page.display_model_info(&info);
        page.display_model_info(&info);
        assert_eq!(page.model_cards.len(), 3);
        assert_eq!(
            page.model_cards[2].body,
            CardBody::List(vec!["is_weekend".into(), "day_of_week".into()])
        );
        match &page.model_cards[0].body {
            CardBody::Details(rows) => assert!(rows.contains(&("RMSE", "34.39".to_string()))),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn submit_control_round_trip() {
        let mut page = PageState::default();
        page.set_submit_busy();
        assert!(page.submit.disabled);
        assert_eq!(page.submit.label, SUBMIT_BUSY_LABEL);
        page.restore_submit();
        assert_eq!(page.submit, SubmitControl::default());
    }
}
