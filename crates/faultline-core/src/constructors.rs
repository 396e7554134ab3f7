//! Predefined errors for the failures handlers raise most often
//!
//! Each constructor binds a kind to its stock message. Context is attached
//! afterwards with [`HttpError::with_context`].

use crate::{ErrorKind, HttpError};

impl ErrorKind {
    /// Stock message for kinds that have a predefined constructor
    pub const fn default_message(self) -> Option<&'static str> {
        let message = match self {
            Self::BadRequest => "The request could not be understood",
            Self::Unauthorized => "Not Authorized",
            Self::Forbidden => "You do not have permission to access this resource",
            Self::NotFound => "The resource you requested was not found",
            Self::MethodNotAllowed => "The requested method is not allowed for this resource",
            Self::Conflict => "The request conflicts with the current state of the resource",
            Self::PayloadTooLarge => "The request payload is too large",
            Self::UnprocessableEntity => "The request was well-formed but could not be processed",
            Self::TooManyRequests => "Too many requests, please try again later",
            Self::InternalServerError => "Something went wrong",
            Self::NotImplemented => "This functionality is not implemented",
            Self::BadGateway => "Received an invalid response from an upstream server",
            Self::ServiceUnavailable => "The service is temporarily unavailable",
            Self::GatewayTimeout => "An upstream server did not respond in time",
            _ => return None,
        };
        Some(message)
    }
}

impl HttpError {
    /// 400
    pub fn bad_request() -> Self {
        Self::for_kind(ErrorKind::BadRequest)
    }

    /// 401, "Not Authorized"
    pub fn unauthorized() -> Self {
        Self::for_kind(ErrorKind::Unauthorized)
    }

    /// 403
    pub fn forbidden() -> Self {
        Self::for_kind(ErrorKind::Forbidden)
    }

    /// 404
    pub fn not_found() -> Self {
        Self::for_kind(ErrorKind::NotFound)
    }

    /// 405
    pub fn method_not_allowed() -> Self {
        Self::for_kind(ErrorKind::MethodNotAllowed)
    }

    /// 409
    pub fn conflict() -> Self {
        Self::for_kind(ErrorKind::Conflict)
    }

    /// 413
    pub fn payload_too_large() -> Self {
        Self::for_kind(ErrorKind::PayloadTooLarge)
    }

    /// 422
    pub fn unprocessable_entity() -> Self {
        Self::for_kind(ErrorKind::UnprocessableEntity)
    }

    /// 429
    pub fn too_many_requests() -> Self {
        Self::for_kind(ErrorKind::TooManyRequests)
    }

    /// 500
    pub fn internal_server_error() -> Self {
        Self::for_kind(ErrorKind::InternalServerError)
    }

    /// 501
    pub fn not_implemented() -> Self {
        Self::for_kind(ErrorKind::NotImplemented)
    }

    /// 502
    pub fn bad_gateway() -> Self {
        Self::for_kind(ErrorKind::BadGateway)
    }

    /// 503
    pub fn service_unavailable() -> Self {
        Self::for_kind(ErrorKind::ServiceUnavailable)
    }

    /// 504
    pub fn gateway_timeout() -> Self {
        Self::for_kind(ErrorKind::GatewayTimeout)
    }
}
