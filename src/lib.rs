// htmlmin - HTML response minifier library
//
// Data flow:
//   caller → gate::MinificationGate::decide(metadata, path)
//          → skip: body returned unchanged
//          → minify: minify::HtmlMinifier rewrites whitespace/comments

pub mod config;
pub mod error;
pub mod exclusion;
pub mod gate;
pub mod logging;
pub mod metrics;
pub mod minify;

pub use config::{Config, MinifyConfig};
pub use error::MinifyError;
pub use exclusion::ExclusionMatcher;
pub use gate::{DecisionReason, MinificationGate, ResponseMetadata};
pub use minify::{minify, HtmlMinifier, MinifyOptions};
