//! Application constants and configuration

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const API_URL_ENV: &str = "CANTEEN_API_URL";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "Canteen Dashboard";

pub const DEFAULT_HEALTH_POLL_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Banner lifetimes
pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(3);
pub const ERROR_BANNER_TTL: Duration = Duration::from_secs(5);

pub const SUBMIT_LABEL: &str = "Get Prediction";
pub const SUBMIT_BUSY_LABEL: &str = "Getting Prediction...";
pub const ITEM_PLACEHOLDER: &str = "Select an item...";
