//! One-shot loads: menu items, model metadata, API info

use super::Shared;
use crate::api::ApiError;
use tracing::{debug, error, info, warn};

pub(crate) async fn load_menu_items(shared: &Shared) {
    match shared.api.menu_items().await {
        Ok(items) => {
            info!(count = items.len(), "Menu items loaded");
            shared.update(|page| {
                page.display_menu_items(&items);
                page.populate_item_select(&items);
            });
        }
        Err(ApiError::Status { status, .. }) => {
            warn!(status = %status, "Menu items request failed");
            shared.update(|page| page.show_error("Failed to load menu items"));
        }
        Err(e) => {
            error!(error = %e, "Menu items error");
            shared.update(|page| page.show_error(format!("Error loading menu items: {}", e)));
        }
    }
}

pub(crate) async fn load_model_info(shared: &Shared) {
    match shared.api.model_info().await {
        Ok(info) => {
            debug!(
                ml_model = %info.ml_model.model_type,
                rl_model = %info.rl_model.model_type,
                "Model info loaded"
            );
            shared.update(|page| page.display_model_info(&info));
        }
        Err(ApiError::Status { status, .. }) => {
            warn!(status = %status, "Model info request failed");
            shared.update(|page| page.show_error("Failed to load model information"));
        }
        Err(e) => {
            error!(error = %e, "Model info error");
            shared.update(|page| page.show_error(format!("Error loading model info: {}", e)));
        }
    }
}

/// The about panel is informational; failures are only logged.
pub(crate) async fn load_api_info(shared: &Shared) {
    match shared.api.api_info().await {
        Ok(info) => {
            debug!(version = %info.version, "API info loaded");
            shared.update(|page| page.display_api_info(info));
        }
        Err(e) => warn!(error = %e, "Failed to load API info"),
    }
}
