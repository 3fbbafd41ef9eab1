//! Prediction request and result rendering

use super::Shared;
use crate::api::ApiError;
use crate::settings::StalePredictions;
use crate::types::PredictionRequest;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

/// Send one prediction request and render whatever comes back.
///
/// Submit-control restoration is owned by the caller so that it also runs
/// when this future is dropped before completing.
pub(crate) async fn request_prediction(
    shared: &Shared,
    request: &PredictionRequest,
    generation: u64,
    latest: &AtomicU64,
    policy: StalePredictions,
) {
    info!(
        generation,
        item_id = request.item_id.as_deref().unwrap_or(""),
        date = request.date.as_deref().unwrap_or(""),
        "Requesting prediction"
    );

    let outcome = shared.api.predict(request).await;

    if policy == StalePredictions::LatestIssued {
        let newest = latest.load(Ordering::SeqCst);
        if newest != generation {
            debug!(generation, newest, "Discarding superseded prediction response");
            return;
        }
    }

    match outcome {
        Ok(result) => {
            info!(
                item_id = %result.item_id,
                quantity = result.predicted_quantity,
                "Prediction received"
            );
            shared.update(|page| {
                page.display_prediction_result(&result, request.date.as_deref());
                page.show_success("Prediction generated successfully!");
            });
        }
        Err(ApiError::Status { status, detail }) => {
            warn!(status = %status, detail = %detail, "Prediction rejected");
            shared.update(|page| page.show_error(format!("Prediction failed: {}", detail)));
        }
        Err(e) => {
            error!(error = %e, "Prediction error");
            shared.update(|page| page.show_error(format!("Error getting prediction: {}", e)));
        }
    }
}
