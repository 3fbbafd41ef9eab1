//! API health check and periodic polling

use super::{Shared, Spawner};
use crate::api::ApiError;
use crate::page::StatusClass;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, warn};

pub(crate) async fn check_api_status(shared: &Shared) {
    let (class, message) = match shared.api.health().await {
        Ok(health) => {
            debug!(model_version = %health.model_version, status = ?health.status, "API healthy");
            (StatusClass::Healthy, format!("API is healthy ({})", health.model_version))
        }
        Err(ApiError::Status { status, .. }) => {
            warn!(status = %status, "Health check returned an error status");
            (StatusClass::Error, "API is not responding".to_string())
        }
        Err(e @ ApiError::Transport(_)) => {
            error!(error = %e, "API status error");
            (StatusClass::Error, "Failed to connect to API".to_string())
        }
        Err(e @ ApiError::Malformed { .. }) => {
            warn!(error = %e, "Health check returned an unexpected body");
            (StatusClass::Error, "API returned an invalid response".to_string())
        }
    };
    shared.update(|page| page.update_api_status(class, message));
}

/// Fire a health check every `period` until cancelled. Checks are not
/// deduplicated: a slow check may overlap the next one.
pub(crate) async fn poll_health(shared: Shared, spawner: Spawner, period: Duration) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let token = spawner.token();

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Health poller stopped");
                break;
            }
            _ = ticker.tick() => {
                let shared = shared.clone();
                spawner.spawn(async move { check_api_status(&shared).await });
            }
        }
    }
}
