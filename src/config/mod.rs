// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::MinifyError;
use crate::exclusion::ExclusionMatcher;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub minify: MinifyConfig,
    pub logging: LoggingConfig,
}

/// Minification settings
///
/// `enabled` and `keep_comments` distinguish "unset" (`None`) from an
/// explicit `false`: an unset `enabled` resolves to `!debug`, an unset
/// `keep_comments` resolves to stripping comments. The upper-case aliases
/// accept the setting names used by Django-style settings files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    /// Global "minify" switch
    #[serde(alias = "HTML_MINIFY", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Keep HTML comments in minified output
    #[serde(
        alias = "KEEP_COMMENTS_ON_MINIFYING",
        skip_serializing_if = "Option::is_none"
    )]
    pub keep_comments: Option<bool>,

    /// Regular expressions matched against the request path
    #[serde(alias = "EXCLUDE_FROM_MINIFYING")]
    pub exclude_patterns: Vec<String>,

    /// Debug mode; minification is off by default when set
    #[serde(alias = "DEBUG")]
    pub debug: bool,
}

impl MinifyConfig {
    /// Resolve the global switch: explicit value, else `!debug`
    pub fn minify_enabled(&self) -> bool {
        self.enabled.unwrap_or(!self.debug)
    }

    /// Resolve comment handling: comments are stripped unless explicitly kept
    pub fn keeps_comments(&self) -> bool {
        self.keep_comments.unwrap_or(false)
    }

    /// Compile the exclusion list
    pub fn exclusion_matcher(&self) -> Result<ExclusionMatcher, MinifyError> {
        ExclusionMatcher::new(&self.exclude_patterns)
    }

    pub fn validate(&self) -> Result<(), MinifyError> {
        self.exclusion_matcher().map(|_| ())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event (default)
    #[default]
    Json,
    /// Human-readable multi-line output
    Pretty,
}

/// Default log filter directive
fn default_log_level() -> String {
    "info".to_string()
}

/// Logging subscriber configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set (default: info)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (default: json)
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, MinifyError> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| MinifyError::Config(e.to_string()))?;

        // Every referenced variable must exist before anything is substituted
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            if std::env::var(var_name).is_err() {
                return Err(MinifyError::Config(format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                )));
            }
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        // An empty document deserializes as null; treat it as all defaults
        if substituted.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&substituted).map_err(|e| MinifyError::Config(e.to_string()))
    }

    /// Load, substitute and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MinifyError> {
        let yaml = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_with_env(&yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MinifyError> {
        self.minify.validate()?;

        if self.logging.level.trim().is_empty() {
            return Err(MinifyError::Config(
                "logging.level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
