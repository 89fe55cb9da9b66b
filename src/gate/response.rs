//! `http::Response` adapter
//!
//! This module implements:
//! - Metadata extraction from a response (status, content type, override)
//! - A typed response extension replacing ad-hoc "minify this" flags
//! - Body replacement that keeps `Content-Length` consistent

use ::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use ::http::{HeaderValue, Response};

use super::{MinificationGate, ResponseMetadata};

/// Per-response override stored in the response extensions
///
/// `MinifyOverride(true)` forces minification, `MinifyOverride(false)`
/// forbids it, regardless of exclusion patterns and the global switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyOverride(pub bool);

/// Force minification of this response
pub fn mark_minified<B>(response: &mut Response<B>) {
    response.extensions_mut().insert(MinifyOverride(true));
}

/// Forbid minification of this response
pub fn mark_not_minified<B>(response: &mut Response<B>) {
    response.extensions_mut().insert(MinifyOverride(false));
}

impl ResponseMetadata {
    /// Read gate inputs from a response
    ///
    /// A missing or non-UTF-8 `Content-Type` yields an empty content type,
    /// which the gate treats as "not HTML".
    pub fn from_response<B>(response: &Response<B>) -> Self {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Self {
            status_code: response.status().as_u16(),
            content_type,
            explicit_override: response.extensions().get::<MinifyOverride>().map(|o| o.0),
        }
    }
}

impl MinificationGate {
    /// Run a buffered response through the gate
    ///
    /// The response is returned untouched when the gate skips it. When the
    /// body is rewritten, a `Content-Length` header that was present is
    /// updated to the new length.
    pub fn process_response(&self, path: &str, response: Response<String>) -> Response<String> {
        let metadata = ResponseMetadata::from_response(&response);
        let (mut parts, body) = response.into_parts();

        let minified = match self.process_with_stats(&metadata, path, &body).body {
            std::borrow::Cow::Owned(minified) => Some(minified),
            std::borrow::Cow::Borrowed(_) => None,
        };

        let body = match minified {
            Some(minified) => {
                if parts.headers.contains_key(CONTENT_LENGTH) {
                    parts
                        .headers
                        .insert(CONTENT_LENGTH, HeaderValue::from(minified.len()));
                }
                minified
            }
            None => body,
        };

        Response::from_parts(parts, body)
    }
}
