use axum::Router;
use axum::extract::{Path, Query};
use axum::routing::get;
use faultline_core::{ErrorKind, HttpError};
use serde::Deserialize;

use crate::ApiError;

#[derive(Debug, Deserialize)]
pub struct ProbeQuery {
    message: Option<String>,
}

/// Routes raising the kind named in the last path segment
pub fn probe_router(path: &str) -> Router {
    Router::new().route(&format!("{path}/{{kind}}"), get(raise_kind))
}

/// Raise the named kind, or a named error when it is not in the registry
///
/// Kinds outside 4xx and 5xx cannot carry an error body, so asking for one
/// is itself a bad request.
async fn raise_kind(Path(name): Path<String>, Query(query): Query<ProbeQuery>) -> Result<(), ApiError> {
    let Ok(kind) = name.parse::<ErrorKind>() else {
        return Err(ApiError::Named {
            name,
            message: query.message.unwrap_or_default(),
        });
    };

    if !kind.class().is_error() {
        return Err(HttpError::new(ErrorKind::BadRequest, "Only 4xx and 5xx kinds can be raised")
            .with_context(serde_json::json!({ "kind": kind }))
            .into());
    }

    let error = match query.message {
        Some(message) => HttpError::new(kind, message),
        None => HttpError::for_kind(kind),
    };

    Err(error.with_context(serde_json::json!({ "probe": kind })).into())
}
