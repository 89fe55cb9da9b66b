//! Gate decision reasons
//!
//! One variant per rule outcome of the decision order, so the gate can
//! log and count why a response was or was not minified.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionReason {
    /// Status code is not 200
    NonOkStatus,
    /// Content type is not `text/html`
    NonHtmlContentType,
    /// Per-response override set to true
    ForcedByOverride,
    /// Per-response override set to false
    ForbiddenByOverride,
    /// Request path matched an exclusion pattern
    ExcludedPath,
    /// Global switch explicitly on
    EnabledGlobally,
    /// Global switch explicitly off
    DisabledGlobally,
    /// Global switch unset, debug mode on
    DebugDefault,
    /// Global switch unset, debug mode off
    ReleaseDefault,
}

impl DecisionReason {
    pub const ALL: [DecisionReason; 9] = [
        DecisionReason::NonOkStatus,
        DecisionReason::NonHtmlContentType,
        DecisionReason::ForcedByOverride,
        DecisionReason::ForbiddenByOverride,
        DecisionReason::ExcludedPath,
        DecisionReason::EnabledGlobally,
        DecisionReason::DisabledGlobally,
        DecisionReason::DebugDefault,
        DecisionReason::ReleaseDefault,
    ];

    /// Whether the body should be minified
    pub fn should_minify(&self) -> bool {
        matches!(
            self,
            DecisionReason::ForcedByOverride
                | DecisionReason::EnabledGlobally
                | DecisionReason::ReleaseDefault
        )
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            DecisionReason::NonOkStatus => "status code is not 200",
            DecisionReason::NonHtmlContentType => "content type is not text/html",
            DecisionReason::ForcedByOverride => "minification forced by response override",
            DecisionReason::ForbiddenByOverride => "minification forbidden by response override",
            DecisionReason::ExcludedPath => "request path is excluded",
            DecisionReason::EnabledGlobally => "minification enabled globally",
            DecisionReason::DisabledGlobally => "minification disabled globally",
            DecisionReason::DebugDefault => "minification off by default in debug mode",
            DecisionReason::ReleaseDefault => "minification on by default outside debug mode",
        }
    }

    /// Stable snake_case label for metrics
    pub fn label(&self) -> &'static str {
        match self {
            DecisionReason::NonOkStatus => "non_ok_status",
            DecisionReason::NonHtmlContentType => "non_html_content_type",
            DecisionReason::ForcedByOverride => "forced_by_override",
            DecisionReason::ForbiddenByOverride => "forbidden_by_override",
            DecisionReason::ExcludedPath => "excluded_path",
            DecisionReason::EnabledGlobally => "enabled_globally",
            DecisionReason::DisabledGlobally => "disabled_globally",
            DecisionReason::DebugDefault => "debug_default",
            DecisionReason::ReleaseDefault => "release_default",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
