use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Symbolic name for a failure condition
///
/// Mirrors the standard HTTP reason phrases in `SCREAMING_SNAKE_CASE`. The
/// set is closed: every variant has exactly one entry in the
/// [`StatusRegistry`](crate::StatusRegistry). Names outside the set fail to
/// parse, and callers are expected to fall back to a 500.
///
/// A few deprecated names are still accepted when parsing and map onto their
/// canonical kind (`INTEMAL_SERVER_ERROR`, `RESUME_INCOMPLETE`, `DUPLICATE`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    // 1xx
    Continue,
    SwitchingProtocols,
    Processing,

    // 2xx, present so the table is complete; never raised as errors
    Ok,
    Created,
    Accepted,
    NonAuthoritativeInformation,
    NoContent,
    ResetContent,
    PartialContent,

    // 3xx
    MultipleChoices,
    MovedPermanently,
    Found,
    SeeOther,
    NotModified,
    TemporaryRedirect,
    #[strum(to_string = "PERMANENT_REDIRECT", serialize = "RESUME_INCOMPLETE")]
    #[serde(alias = "RESUME_INCOMPLETE")]
    PermanentRedirect,

    // 4xx
    BadRequest,
    Unauthorized,
    PaymentRequired,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    RequestTimeout,
    #[strum(to_string = "CONFLICT", serialize = "DUPLICATE")]
    #[serde(alias = "DUPLICATE")]
    Conflict,
    Gone,
    LengthRequired,
    PreconditionFailed,
    PayloadTooLarge,
    UriTooLong,
    UnsupportedMediaType,
    RequestedRangeNotSatisfiable,
    ExpectationFailed,
    UnprocessableEntity,
    TooManyRequests,
    ClientClosedRequest,

    // 5xx
    #[strum(to_string = "INTERNAL_SERVER_ERROR", serialize = "INTEMAL_SERVER_ERROR")]
    #[serde(alias = "INTEMAL_SERVER_ERROR")]
    InternalServerError,
    NotImplemented,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    HttpVersionNotSupported,
}

impl ErrorKind {
    /// Canonical name, e.g. `METHOD_NOT_ALLOWED`
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Name rendered for people: separators replaced with spaces
    pub fn display_name(self) -> String {
        crate::payload::display_type(self.as_str())
    }

    /// Status code from the global registry, 500 if the kind is unmapped
    pub fn status_code(self) -> http::StatusCode {
        crate::StatusRegistry::global()
            .lookup(self)
            .unwrap_or(crate::DEFAULT_STATUS)
    }

    /// Status class of this kind
    pub fn class(self) -> StatusClass {
        StatusClass::of(self.status_code())
    }
}

/// Coarse grouping of status codes by their hundreds digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
}

impl StatusClass {
    /// Classify a status code
    pub fn of(status: http::StatusCode) -> Self {
        if status.is_informational() {
            Self::Informational
        } else if status.is_success() {
            Self::Success
        } else if status.is_redirection() {
            Self::Redirection
        } else if status.is_client_error() {
            Self::ClientError
        } else {
            Self::ServerError
        }
    }

    /// Whether responses of this class describe a failure
    pub const fn is_error(self) -> bool {
        matches!(self, Self::ClientError | Self::ServerError)
    }
}
