//! HTTP surface: `GET /similarity/{left}/{right}`.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;

use crate::processing::SimilarityRequest;
use crate::processing::similarity::{ErrorKind, SimilarityService};

/// Body returned for failed computations when errors are masked.
pub const FALLBACK_SCORE: f64 = 0.0;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SimilarityService>,
    /// Mask failures behind [`FALLBACK_SCORE`] with status 200.
    pub fallback_on_error: bool,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/similarity/:left/:right", get(similarity))
        .with_state(state)
}

/// Shortest round-trip decimal that always keeps a fractional part.
/// Magnitudes below `1e-3` use the `1.0E-5` scientific form.
pub fn format_score(score: f64) -> String {
    if score == 0.0 || score.abs() >= 1e-3 {
        return format!("{score:?}");
    }
    let scientific = format!("{score:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => scientific,
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::OracleUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Computation => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
    }
}

async fn similarity(
    State(state): State<AppState>,
    Path((left, right)): Path<(String, String)>,
) -> (StatusCode, String) {
    let request = SimilarityRequest::parse(&left, &right);

    match state.service.compute(request).await {
        Ok(score) => (StatusCode::OK, format_score(score)),
        Err(error) => {
            log::error!(
                "Similarity of /{left}/{right} failed ({:?}): {error}",
                error.kind()
            );
            if state.fallback_on_error {
                (StatusCode::OK, format_score(FALLBACK_SCORE))
            } else {
                (status_for(error.kind()), error.to_string())
            }
        }
    }
}
