use serde_json::json;

use crate::HttpError;

/// Reject a request that matched no route
///
/// Produces a `FORBIDDEN` error whose context carries the request path with
/// duplicate slashes collapsed, so `//admin//users` and `/admin/users` are
/// reported the same way.
pub fn reject_unmatched_route<B>(request: &http::Request<B>) -> HttpError {
    reject_unmatched_path(request.uri().path())
}

/// [`reject_unmatched_route`] for callers that only have the path
pub fn reject_unmatched_path(path: &str) -> HttpError {
    let path = normalize_path(path);
    tracing::debug!(%path, "no route matched");
    HttpError::forbidden().with_context(json!({ "path": path }))
}

/// Collapse runs of `/` into one, keeping a leading slash
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    if !path.starts_with('/') {
        normalized.push('/');
    }

    for c in path.chars() {
        if c == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(c);
    }

    normalized
}
