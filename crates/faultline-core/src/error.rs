use std::backtrace::{Backtrace, BacktraceStatus};

use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{ErrorKind, StatusRegistry};

/// Message used when an error is built without one
pub const DEFAULT_MESSAGE: &str = "Please provide an error message";

/// Kind used when an error is built without one
pub const DEFAULT_KIND: ErrorKind = ErrorKind::InternalServerError;

/// A failure raised while handling a request
///
/// Carries a symbolic [`ErrorKind`], a client-facing message and optional
/// diagnostic context. Values are built at the point of failure, returned
/// through `Err` (see [`HttpError::raise`] and [`raise!`](crate::raise)) and
/// consumed once by the [`ErrorResponder`](crate::ErrorResponder).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpError {
    kind: ErrorKind,
    message: String,
    context: Option<Value>,
    trace: Option<Backtrace>,
}

/// Loose description of an error, every field optional
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpErrorParams {
    #[serde(default)]
    pub kind: Option<ErrorKind>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub context: Option<Value>,
}

impl HttpError {
    /// Build an error of the given kind
    ///
    /// An empty message is replaced with [`DEFAULT_MESSAGE`].
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            DEFAULT_MESSAGE.to_owned()
        } else {
            message
        };

        Self {
            kind,
            message,
            context: None,
            trace: capture_trace(),
        }
    }

    /// Build an error from optional parts
    ///
    /// A missing kind becomes [`DEFAULT_KIND`], a missing message
    /// [`DEFAULT_MESSAGE`].
    pub fn from_params(params: HttpErrorParams) -> Self {
        let error = Self::new(
            params.kind.unwrap_or(DEFAULT_KIND),
            params.message.unwrap_or_default(),
        );
        match params.context {
            Some(context) => error.with_context(context),
            None => error,
        }
    }

    /// Build an error of the given kind with its stock message
    ///
    /// Kinds without a predefined message use the status code's reason
    /// phrase.
    pub fn for_kind(kind: ErrorKind) -> Self {
        let message = kind
            .default_message()
            .or_else(|| kind.status_code().canonical_reason())
            .unwrap_or(DEFAULT_MESSAGE);
        Self::new(kind, message)
    }

    /// Attach diagnostic context, replacing any previous context
    #[must_use]
    pub fn with_context(mut self, context: impl Into<Value>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Symbolic kind
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Client-facing message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostic context, if any
    pub const fn context(&self) -> Option<&Value> {
        self.context.as_ref()
    }

    /// Rendered backtrace, only present when backtraces are enabled
    /// (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`)
    ///
    /// Symbols are resolved on each call, so only call this when the trace
    /// is actually going to be shown.
    pub fn trace(&self) -> Option<String> {
        self.trace.as_ref().map(ToString::to_string)
    }

    /// Drop the captured backtrace
    ///
    /// For errors synthesized away from the failure site, where the trace
    /// would only point at the code doing the synthesizing.
    #[must_use]
    pub fn without_trace(mut self) -> Self {
        self.trace = None;
        self
    }

    /// HTTP status for this error, 500 when the kind is unmapped
    pub fn status_code(&self) -> StatusCode {
        StatusRegistry::global()
            .lookup(self.kind)
            .unwrap_or(crate::DEFAULT_STATUS)
    }

    /// Signal the failure
    ///
    /// Always returns `Err(self)`, so a handler can end with
    /// `HttpError::not_found().raise()`.
    ///
    /// # Errors
    ///
    /// Always.
    pub fn raise<T>(self) -> Result<T, Self> {
        Err(self)
    }
}

impl From<HttpErrorParams> for HttpError {
    fn from(params: HttpErrorParams) -> Self {
        Self::from_params(params)
    }
}

impl From<ErrorKind> for HttpError {
    fn from(kind: ErrorKind) -> Self {
        Self::for_kind(kind)
    }
}

fn capture_trace() -> Option<Backtrace> {
    let backtrace = Backtrace::capture();
    (backtrace.status() == BacktraceStatus::Captured).then_some(backtrace)
}

/// Return early from the enclosing function with an error
///
/// The argument is converted with `Into`, so anything that converts into the
/// function's error type works: an [`HttpError`], an [`ErrorKind`] or
/// [`HttpErrorParams`].
///
/// ```
/// use faultline_core::{raise, HttpError};
///
/// fn find(id: u32) -> Result<&'static str, HttpError> {
///     if id != 1 {
///         raise!(HttpError::not_found().with_context(serde_json::json!({ "id": id })));
///     }
///     Ok("one")
/// }
///
/// assert_eq!(find(2).unwrap_err().status_code().as_u16(), 404);
/// ```
#[macro_export]
macro_rules! raise {
    ($error:expr $(,)?) => {
        return ::core::result::Result::Err(::core::convert::Into::into($error))
    };
}
