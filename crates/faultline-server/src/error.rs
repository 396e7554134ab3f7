use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use faultline_core::{HttpError, StatusRegistry};
use http::StatusCode;
use thiserror::Error;

/// Error type returned by handlers
///
/// Converting into a response does not render anything yet: the error is
/// parked in the response extensions and turned into a JSON payload by
/// [`error_responder_middleware`](crate::error_responder_middleware), which
/// knows the environment.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A classified failure
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A failure known only by its kind name
    #[error("{message}")]
    Named { name: String, message: String },

    /// Anything else, reported as a 500
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Status the rendered response will carry
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Http(error) => error.status_code(),
            Self::Named { name, .. } => StatusRegistry::global().resolve_name(name),
            Self::Other(_) => faultline_core::DEFAULT_STATUS,
        }
    }
}

/// Response extension carrying the error a handler raised
#[derive(Debug, Clone)]
pub(crate) struct RaisedError(pub(crate) Arc<ApiError>);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.status_code().into_response();
        response.extensions_mut().insert(RaisedError(Arc::new(self)));
        response
    }
}

#[cfg(test)]
mod tests {
    use faultline_core::ErrorKind;

    use super::*;

    #[test]
    fn status_follows_the_error() {
        assert_eq!(ApiError::from(HttpError::conflict()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let named = ApiError::Named {
            name: "GATEWAY_TIMEOUT".to_owned(),
            message: String::new(),
        };
        assert_eq!(named.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn into_response_parks_the_error() {
        let response = ApiError::from(HttpError::for_kind(ErrorKind::Gone)).into_response();

        assert_eq!(response.status(), StatusCode::GONE);
        let raised = response.extensions().get::<RaisedError>().unwrap();
        assert!(matches!(raised.0.as_ref(), ApiError::Http(e) if e.kind() == ErrorKind::Gone));
    }
}
