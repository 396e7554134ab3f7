use axum::extract::Request;

use crate::ApiError;

/// Fallback for requests that matched no route
pub async fn unmatched_route_handler(request: Request) -> ApiError {
    faultline_core::reject_unmatched_route(&request).into()
}
