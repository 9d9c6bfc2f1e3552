/**
 * Error Conversion
 *
 * Converts backend errors into HTTP responses.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "error": "Collection not found"
 * }
 * ```
 *
 * Server-side failures are logged with their full detail before the opaque
 * response is produced.
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;
use crate::shared::ErrorResponse;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed with {}: {:?}", status, self);
        } else {
            tracing::warn!("Request rejected with {}: {}", status, self);
        }

        (status, Json(ErrorResponse::new(self.message()))).into_response()
    }
}
