//! User settings stored as settings.json in the app data directory

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// What to do with a prediction response that arrives after a newer request was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePredictions {
    /// Every response renders; whichever resolves last wins.
    LastResolved,
    /// Responses to superseded requests are dropped.
    LatestIssued,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // API
    pub api_base_url: String,
    pub health_poll_secs: u64,
    pub request_timeout_secs: u64,
    pub stale_predictions: StalePredictions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            health_poll_secs: DEFAULT_HEALTH_POLL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            stale_predictions: StalePredictions::LastResolved,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Base URL with the environment override applied and trailing slashes removed.
    pub fn resolved_api_url(&self) -> String {
        Self::pick_api_url(std::env::var(API_URL_ENV).ok(), &self.api_base_url)
    }

    fn pick_api_url(env_value: Option<String>, configured: &str) -> String {
        let url = env_value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| configured.to_string());
        url.trim().trim_end_matches('/').to_string()
    }

    pub fn health_poll_interval(&self) -> Duration {
        Duration::from_secs(self.health_poll_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
