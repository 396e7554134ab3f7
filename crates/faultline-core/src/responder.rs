use http::StatusCode;

use crate::{
    Diagnostics, Environment, ErrorKind, HttpError, ResponsePayload, StatusClass, StatusRegistry, payload::display_type,
};

/// Message sent when an error has none of its own
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Turns raised errors into [`ResponsePayload`]s
///
/// Stateless apart from the environment, which decides whether diagnostics
/// are included. Every handled error is logged once, at `error` for server
/// errors and `warn` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorResponder {
    environment: Environment,
}

impl ErrorResponder {
    pub const fn new(environment: Environment) -> Self {
        Self { environment }
    }

    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Describe any error
    ///
    /// The first [`HttpError`] found in the error's source chain decides the
    /// status; anything else is a 500.
    pub fn handle(&self, error: &(dyn std::error::Error + 'static)) -> ResponsePayload {
        let http_error = std::iter::successors(Some(error), |e| e.source()).find_map(|e| e.downcast_ref::<HttpError>());

        if let Some(http_error) = http_error {
            return self.handle_http(http_error);
        }

        let diagnostics = self
            .environment
            .is_development()
            .then(|| Diagnostics::from_error(error));

        self.respond(
            crate::DEFAULT_STATUS,
            ErrorKind::InternalServerError.as_str(),
            &error.to_string(),
            diagnostics,
        )
    }

    /// Describe an [`HttpError`]
    pub fn handle_http(&self, error: &HttpError) -> ResponsePayload {
        let diagnostics = self.environment.is_development().then(|| Diagnostics {
            error: format!("{}: {}", error.kind(), error.message()),
            chain: Vec::new(),
            context: error.context().cloned(),
            backtrace: error.trace(),
        });

        self.respond(error.status_code(), error.kind().as_str(), error.message(), diagnostics)
    }

    /// Describe an error known only by name
    ///
    /// Names outside the registry become a 500 but keep their own name as
    /// the payload type.
    pub fn handle_named(&self, name: &str, message: &str, diagnostics: Option<Diagnostics>) -> ResponsePayload {
        let status = StatusRegistry::global().resolve_name(name);
        self.respond(status, name, message, diagnostics)
    }

    fn respond(
        &self,
        status: StatusCode,
        name: &str,
        message: &str,
        diagnostics: Option<Diagnostics>,
    ) -> ResponsePayload {
        let message = if message.is_empty() { FALLBACK_MESSAGE } else { message };

        let payload = ResponsePayload {
            success: false,
            status: status.as_u16(),
            error_type: display_type(name),
            message: message.to_owned(),
            stack: diagnostics.filter(|_| self.environment.is_development()),
        };

        if StatusClass::of(status) == StatusClass::ServerError {
            tracing::error!(status = payload.status, error_type = %payload.error_type, detail = message, "request failed");
        } else {
            tracing::warn!(status = payload.status, error_type = %payload.error_type, detail = message, "request failed");
        }

        payload
    }
}
