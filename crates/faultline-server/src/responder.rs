use std::any::Any;

use axum::Json;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use faultline_core::{ErrorResponder, HttpError, ResponsePayload, StatusClass, StatusRegistry};
use http::header::{self, HeaderMap};
use serde_json::json;

use crate::error::{ApiError, RaisedError};

/// Render failed responses as JSON payloads
///
/// Handles errors raised by handlers (parked by [`ApiError`]) and bare error
/// responses produced by the framework or other layers, such as a 405 from
/// method routing or a 413 from the body limit. Responses that are already
/// JSON, successes and statuses outside the registry pass through untouched.
pub async fn error_responder_middleware(responder: ErrorResponder, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    render(&responder, response)
}

fn render(responder: &ErrorResponder, mut response: Response) -> Response {
    if let Some(RaisedError(error)) = response.extensions_mut().remove::<RaisedError>() {
        let payload = match error.as_ref() {
            ApiError::Http(error) => responder.handle_http(error),
            ApiError::Named { name, message } => responder.handle_named(name, message, None),
            ApiError::Other(error) => responder.handle(&**error),
        };
        return with_payload(response, &payload);
    }

    let status = response.status();
    if !StatusClass::of(status).is_error() || is_json(response.headers()) {
        return response;
    }

    match StatusRegistry::global().kind_for_status(status) {
        Some(kind) => {
            let payload = responder.handle_http(&HttpError::for_kind(kind).without_trace());
            with_payload(response, &payload)
        }
        None => response,
    }
}

/// Replace the body with the payload, keeping headers such as `Allow` or
/// `Retry-After`
fn with_payload(response: Response, payload: &ResponsePayload) -> Response {
    let (parts, _) = response.into_parts();

    let mut rendered = (payload.status_code(), Json(payload)).into_response();
    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rendered.headers_mut().append(name.clone(), value.clone());
        }
    }

    rendered
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Response for a handler that panicked
///
/// The panic message is kept as context, so only development responses
/// show it.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = message, "handler panicked");

    let error = HttpError::internal_server_error()
        .without_trace()
        .with_context(json!({ "panic": message }));

    ApiError::from(error).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use faultline_core::{Environment, ErrorKind};
    use http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::Value;

    use super::*;

    const PRODUCTION: ErrorResponder = ErrorResponder::new(Environment::Production);
    const DEVELOPMENT: ErrorResponder = ErrorResponder::new(Environment::Development);

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn raised_errors_become_payloads() {
        let response = render(&PRODUCTION, ApiError::from(HttpError::unauthorized()).into_response());

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(is_json(response.headers()));
        assert_eq!(
            body_json(response).await,
            json!({
                "success": false,
                "status": 401,
                "type": "UNAUTHORIZED",
                "message": "Not Authorized"
            })
        );
    }

    #[tokio::test]
    async fn development_includes_stack() {
        let error = HttpError::not_found().with_context(json!({ "id": 3 }));
        let response = render(&DEVELOPMENT, ApiError::from(error).into_response());

        let body = body_json(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["stack"]["error"], "NOT_FOUND: The resource you requested was not found");
        assert_eq!(body["stack"]["context"], json!({ "id": 3 }));
    }

    #[tokio::test]
    async fn other_errors_are_500_with_their_message() {
        let response = render(&PRODUCTION, ApiError::from(anyhow::anyhow!("cache offline")).into_response());

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["type"], "INTERNAL SERVER ERROR");
        assert_eq!(body["message"], "cache offline");
    }

    #[tokio::test]
    async fn named_errors_use_registry() {
        let error = ApiError::Named {
            name: "NOT_IMPLEMENTED".to_owned(),
            message: String::new(),
        };
        let response = render(&PRODUCTION, error.into_response());

        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        let body = body_json(response).await;
        assert_eq!(body["type"], "NOT IMPLEMENTED");
        assert_eq!(body["message"], "Something went wrong");
    }

    #[tokio::test]
    async fn bare_error_responses_are_mapped_and_keep_headers() {
        let response = Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(header::ALLOW, "GET,HEAD")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("nope"))
            .unwrap();

        let response = render(&PRODUCTION, response);

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET,HEAD");
        assert!(is_json(response.headers()));

        let body = body_json(response).await;
        assert_eq!(body["type"], "METHOD NOT ALLOWED");
        assert_eq!(body["message"], ErrorKind::MethodNotAllowed.default_message().unwrap());
    }

    #[tokio::test]
    async fn bare_error_responses_carry_no_backtrace() {
        let response = render(&DEVELOPMENT, StatusCode::BAD_GATEWAY.into_response());

        let body = body_json(response).await;
        assert_eq!(body["status"], 502);
        assert!(body["stack"].get("backtrace").is_none());
    }

    #[tokio::test]
    async fn json_and_successful_responses_pass_through() {
        let response = (StatusCode::BAD_REQUEST, Json(json!({ "custom": true }))).into_response();
        let response = render(&PRODUCTION, response);
        assert_eq!(body_json(response).await, json!({ "custom": true }));

        let response = render(&PRODUCTION, (StatusCode::OK, "fine").into_response());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"fine");
    }

    #[tokio::test]
    async fn unregistered_statuses_pass_through() {
        let response = render(&PRODUCTION, (StatusCode::IM_A_TEAPOT, "short and stout").into_response());
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert!(!is_json(response.headers()));
    }

    #[tokio::test]
    async fn panics_hide_the_message_in_production() {
        let response = render(&PRODUCTION, panic_response(Box::new("index out of bounds")));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Something went wrong");
        assert!(body.get("stack").is_none());

        let response = render(&DEVELOPMENT, panic_response(Box::new(String::from("index out of bounds"))));
        let body = body_json(response).await;
        assert_eq!(body["stack"]["context"]["panic"], "index out of bounds");
    }
}
