use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Build the shared HTTP client used by every provider adapter.
///
/// The client-level timeout doubles as the pipeline's only cancellation
/// mechanism: a synthesis that outlives it fails as a whole, no partial
/// output is kept.
pub fn build_http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))
}
