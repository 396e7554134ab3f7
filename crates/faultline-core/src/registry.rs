use std::collections::HashMap;
use std::sync::OnceLock;

use http::StatusCode;

use crate::ErrorKind;

/// Status used whenever a kind or name cannot be resolved
pub const DEFAULT_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// The narrow status set older callers were written against
///
/// Deprecated: every entry is also in the canonical table with the same
/// code. `CONFLICT` was called `DUPLICATE` there, which still parses.
pub const LEGACY_KINDS: [ErrorKind; 10] = [
    ErrorKind::Ok,
    ErrorKind::Created,
    ErrorKind::Accepted,
    ErrorKind::NoContent,
    ErrorKind::BadRequest,
    ErrorKind::Unauthorized,
    ErrorKind::Forbidden,
    ErrorKind::NotFound,
    ErrorKind::Conflict,
    ErrorKind::InternalServerError,
];

const TABLE: [(ErrorKind, u16); 43] = [
    (ErrorKind::Continue, 100),
    (ErrorKind::SwitchingProtocols, 101),
    (ErrorKind::Processing, 102),
    (ErrorKind::Ok, 200),
    (ErrorKind::Created, 201),
    (ErrorKind::Accepted, 202),
    (ErrorKind::NonAuthoritativeInformation, 203),
    (ErrorKind::NoContent, 204),
    (ErrorKind::ResetContent, 205),
    (ErrorKind::PartialContent, 206),
    (ErrorKind::MultipleChoices, 300),
    (ErrorKind::MovedPermanently, 301),
    (ErrorKind::Found, 302),
    (ErrorKind::SeeOther, 303),
    (ErrorKind::NotModified, 304),
    (ErrorKind::TemporaryRedirect, 307),
    (ErrorKind::PermanentRedirect, 308),
    (ErrorKind::BadRequest, 400),
    (ErrorKind::Unauthorized, 401),
    (ErrorKind::PaymentRequired, 402),
    (ErrorKind::Forbidden, 403),
    (ErrorKind::NotFound, 404),
    (ErrorKind::MethodNotAllowed, 405),
    (ErrorKind::NotAcceptable, 406),
    (ErrorKind::RequestTimeout, 408),
    (ErrorKind::Conflict, 409),
    (ErrorKind::Gone, 410),
    (ErrorKind::LengthRequired, 411),
    (ErrorKind::PreconditionFailed, 412),
    (ErrorKind::PayloadTooLarge, 413),
    (ErrorKind::UriTooLong, 414),
    (ErrorKind::UnsupportedMediaType, 415),
    (ErrorKind::RequestedRangeNotSatisfiable, 416),
    (ErrorKind::ExpectationFailed, 417),
    (ErrorKind::UnprocessableEntity, 422),
    (ErrorKind::TooManyRequests, 429),
    (ErrorKind::ClientClosedRequest, 499),
    (ErrorKind::InternalServerError, 500),
    (ErrorKind::NotImplemented, 501),
    (ErrorKind::BadGateway, 502),
    (ErrorKind::ServiceUnavailable, 503),
    (ErrorKind::GatewayTimeout, 504),
    (ErrorKind::HttpVersionNotSupported, 505),
];

static REGISTRY: OnceLock<StatusRegistry> = OnceLock::new();

/// Read-only mapping from [`ErrorKind`] to HTTP status code
///
/// Built once on first access and shared by every request afterwards.
/// There is no way to mutate it, so concurrent readers need no locking.
#[derive(Debug)]
pub struct StatusRegistry {
    by_kind: HashMap<ErrorKind, StatusCode>,
    by_status: HashMap<StatusCode, ErrorKind>,
}

impl StatusRegistry {
    /// The process-wide registry
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::build)
    }

    fn build() -> Self {
        let mut by_kind = HashMap::with_capacity(TABLE.len());
        let mut by_status = HashMap::with_capacity(TABLE.len());

        for (kind, code) in TABLE {
            // every code in the table is within 100..=999
            if let Ok(status) = StatusCode::from_u16(code) {
                by_kind.insert(kind, status);
                by_status.entry(status).or_insert(kind);
            }
        }

        Self { by_kind, by_status }
    }

    /// Status code for a kind
    pub fn lookup(&self, kind: ErrorKind) -> Option<StatusCode> {
        self.by_kind.get(&kind).copied()
    }

    /// Status code for a kind given by name, `None` if the name is unknown
    pub fn lookup_name(&self, name: &str) -> Option<StatusCode> {
        name.parse::<ErrorKind>().ok().and_then(|kind| self.lookup(kind))
    }

    /// Status code for a kind given by name, falling back to [`DEFAULT_STATUS`]
    pub fn resolve_name(&self, name: &str) -> StatusCode {
        self.lookup_name(name).unwrap_or(DEFAULT_STATUS)
    }

    /// Canonical kind for a status code
    pub fn kind_for_status(&self, status: StatusCode) -> Option<ErrorKind> {
        self.by_status.get(&status).copied()
    }

    /// Every `(kind, status)` pair, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (ErrorKind, StatusCode)> + '_ {
        self.by_kind.iter().map(|(kind, status)| (*kind, *status))
    }

    /// Number of kinds in the registry
    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    /// Whether the registry holds no kinds
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}
