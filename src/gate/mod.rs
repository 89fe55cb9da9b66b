//! Minification gate
//!
//! Decides, per response, whether the body should be minified and runs the
//! engine when it should. Rules are applied in strict precedence order,
//! first match wins:
//!
//! 1. status code other than 200 → skip
//! 2. content type (parameters ignored, case-insensitive) not `text/html` → skip
//! 3. per-response override present → minify iff it is `true`
//! 4. request path matches an exclusion pattern → skip
//! 5. global switch, defaulting to `!debug` when unset
//!
//! The gate holds only read-only configuration and compiled patterns, so a
//! single instance can be shared across threads.
//!
//! # Module Organization
//!
//! - [`decision`] - Decision reasons reported by [`MinificationGate::decide`]
//! - [`response`] - Adapter for `http::Response` and the typed override extension

pub mod decision;
pub mod response;

use std::borrow::Cow;
use std::time::Instant;

use crate::config::MinifyConfig;
use crate::error::MinifyError;
use crate::exclusion::ExclusionMatcher;
use crate::metrics::{MinifyMetrics, MinifyStats};
use crate::minify::{HtmlMinifier, MinifyOptions};

pub use decision::DecisionReason;
pub use response::{mark_minified, mark_not_minified, MinifyOverride};

/// Response metadata consulted by the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub status_code: u16,
    /// Raw `Content-Type` header value, parameters included
    pub content_type: String,
    /// Per-response force (`Some(true)`) or forbid (`Some(false)`)
    pub explicit_override: Option<bool>,
}

impl ResponseMetadata {
    pub fn new(status_code: u16, content_type: impl Into<String>) -> Self {
        Self {
            status_code,
            content_type: content_type.into(),
            explicit_override: None,
        }
    }

    pub fn with_override(mut self, minify: bool) -> Self {
        self.explicit_override = Some(minify);
        self
    }

    pub fn with_optional_override(mut self, minify: Option<bool>) -> Self {
        self.explicit_override = minify;
        self
    }

    pub fn is_html(&self) -> bool {
        is_html_content_type(&self.content_type)
    }
}

/// True for `text/html`, ignoring parameters such as `charset` and case
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case("text/html"))
        .unwrap_or(false)
}

/// Interpret a textual override value
///
/// Anything that is not a recognisable boolean is treated as absent.
pub fn parse_override(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(value = %raw, "Ignoring minify override that is not a boolean");
            None
        }
    }
}

/// Result of running a body through the gate
#[derive(Debug, Clone)]
pub struct GateOutcome<'a> {
    /// Minified body, or the input borrowed unchanged
    pub body: Cow<'a, str>,
    pub reason: DecisionReason,
    /// Present only when the body was minified
    pub stats: Option<MinifyStats>,
}

/// Per-response minification decision and execution
#[derive(Debug, Clone)]
pub struct MinificationGate {
    config: MinifyConfig,
    exclusions: ExclusionMatcher,
    minifier: HtmlMinifier,
}

impl MinificationGate {
    /// Build a gate, compiling the exclusion list once
    pub fn new(config: MinifyConfig) -> Result<Self, MinifyError> {
        let exclusions = config.exclusion_matcher()?;
        let minifier = HtmlMinifier::new(MinifyOptions::new(config.keeps_comments()));

        tracing::info!(
            minify_enabled = config.minify_enabled(),
            keep_comments = config.keeps_comments(),
            exclude_patterns = exclusions.len(),
            debug = config.debug,
            "Minification gate configured"
        );

        Ok(Self {
            config,
            exclusions,
            minifier,
        })
    }

    pub fn config(&self) -> &MinifyConfig {
        &self.config
    }

    pub fn minifier(&self) -> &HtmlMinifier {
        &self.minifier
    }

    /// Apply the decision rules in precedence order
    pub fn decide(&self, metadata: &ResponseMetadata, path: &str) -> DecisionReason {
        if metadata.status_code != 200 {
            return DecisionReason::NonOkStatus;
        }

        if !metadata.is_html() {
            return DecisionReason::NonHtmlContentType;
        }

        // The override outranks both the exclusion list and the global switch
        match metadata.explicit_override {
            Some(true) => return DecisionReason::ForcedByOverride,
            Some(false) => return DecisionReason::ForbiddenByOverride,
            None => {}
        }

        if self.exclusions.matches(path) {
            return DecisionReason::ExcludedPath;
        }

        match self.config.enabled {
            Some(true) => DecisionReason::EnabledGlobally,
            Some(false) => DecisionReason::DisabledGlobally,
            None if self.config.debug => DecisionReason::DebugDefault,
            None => DecisionReason::ReleaseDefault,
        }
    }

    pub fn should_minify(&self, metadata: &ResponseMetadata, path: &str) -> bool {
        self.decide(metadata, path).should_minify()
    }

    /// Decide and, if allowed, minify `body`; reports the reason and figures
    pub fn process_with_stats<'a>(
        &self,
        metadata: &ResponseMetadata,
        path: &str,
        body: &'a str,
    ) -> GateOutcome<'a> {
        let reason = self.decide(metadata, path);
        let metrics = MinifyMetrics::global();
        metrics.record_decision(reason);

        if !reason.should_minify() {
            tracing::debug!(
                path = %path,
                status = metadata.status_code,
                reason = reason.label(),
                "Response left unminified"
            );
            return GateOutcome {
                body: Cow::Borrowed(body),
                reason,
                stats: None,
            };
        }

        let started = Instant::now();
        let minified = self.minifier.minify(body);
        let stats = MinifyStats::new(body.len(), minified.len(), started.elapsed());
        metrics.record_minification(&stats);

        tracing::debug!(
            path = %path,
            reason = reason.label(),
            original_size = stats.original_size,
            minified_size = stats.minified_size,
            "Response minified"
        );

        GateOutcome {
            body: Cow::Owned(minified),
            reason,
            stats: Some(stats),
        }
    }

    /// Decide and, if allowed, minify `body`
    pub fn process<'a>(
        &self,
        metadata: &ResponseMetadata,
        path: &str,
        body: &'a str,
    ) -> Cow<'a, str> {
        self.process_with_stats(metadata, path, body).body
    }
}
