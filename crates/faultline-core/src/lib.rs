//! HTTP error taxonomy
//!
//! Maps symbolic [`ErrorKind`]s to status codes through a fixed
//! [`StatusRegistry`], carries failures as [`HttpError`] values and turns
//! whatever a handler raised into a [`ResponsePayload`] with the
//! [`ErrorResponder`]. Nothing here depends on a web framework; the server
//! crate does the wiring.

#![allow(clippy::must_use_candidate)]

mod constructors;
mod environment;
mod error;
mod kind;
pub mod payload;
mod registry;
mod responder;
mod route;

pub use environment::Environment;
pub use error::{DEFAULT_KIND, DEFAULT_MESSAGE, HttpError, HttpErrorParams};
pub use kind::{ErrorKind, StatusClass};
pub use payload::{Diagnostics, ResponsePayload};
pub use registry::{DEFAULT_STATUS, LEGACY_KINDS, StatusRegistry};
pub use responder::{ErrorResponder, FALLBACK_MESSAGE};
pub use route::{normalize_path, reject_unmatched_path, reject_unmatched_route};
