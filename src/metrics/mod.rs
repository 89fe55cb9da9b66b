// Metrics module - Prometheus counters for minification decisions
//
// Provides:
// - Decision counters labelled by reason
// - Bytes saved by minification
// - Minification duration histogram
// - Per-document MinifyStats for callers that want the figures directly

use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};
use serde::{Serialize, Serializer};
use std::sync::OnceLock;
use std::time::Duration;

use crate::gate::DecisionReason;

/// Global metrics registry for the minifier
pub struct MinifyMetrics {
    /// Gate decisions by reason
    pub responses: IntCounterVec,

    /// Total bytes removed from minified bodies
    pub bytes_saved: IntCounter,

    /// Time spent minifying a body (in seconds)
    pub minify_duration: Histogram,
}

/// Global singleton instance of metrics
static METRICS: OnceLock<MinifyMetrics> = OnceLock::new();

impl MinifyMetrics {
    /// Initialize and return the global metrics instance
    ///
    /// Collectors are registered with the default Prometheus registry on
    /// first use; later calls return the same instance.
    pub fn global() -> &'static Self {
        METRICS.get_or_init(|| {
            let responses = register_int_counter_vec!(
                "htmlmin_responses_total",
                "Total number of gate decisions by reason",
                &["reason"]
            )
            .expect("Failed to register htmlmin_responses_total metric");

            let bytes_saved = register_int_counter!(
                "htmlmin_bytes_saved_total",
                "Total number of bytes removed by minification"
            )
            .expect("Failed to register htmlmin_bytes_saved_total metric");

            let minify_duration = register_histogram!(
                "htmlmin_minify_duration_seconds",
                "Duration of a single minification pass in seconds",
                vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1] // 10μs to 100ms
            )
            .expect("Failed to register htmlmin_minify_duration_seconds metric");

            MinifyMetrics {
                responses,
                bytes_saved,
                minify_duration,
            }
        })
    }

    pub fn record_decision(&self, reason: DecisionReason) {
        self.responses.with_label_values(&[reason.label()]).inc();
    }

    pub fn record_minification(&self, stats: &MinifyStats) {
        self.bytes_saved.inc_by(stats.bytes_saved() as u64);
        self.minify_duration.observe(stats.duration.as_secs_f64());
    }

    pub fn decision_count(&self, reason: DecisionReason) -> u64 {
        self.responses.with_label_values(&[reason.label()]).get()
    }
}

/// Minification figures for a single document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinifyStats {
    /// Input size in bytes
    pub original_size: usize,
    /// Output size in bytes
    pub minified_size: usize,
    /// Time taken to minify
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl MinifyStats {
    pub fn new(original_size: usize, minified_size: usize, duration: Duration) -> Self {
        Self {
            original_size,
            minified_size,
            duration,
        }
    }

    /// Bytes removed by minification
    pub fn bytes_saved(&self) -> usize {
        self.original_size.saturating_sub(self.minified_size)
    }

    /// Output size relative to input size (minified / original)
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            1.0
        } else {
            self.minified_size as f64 / self.original_size as f64
        }
    }

    /// Percentage of the input removed
    pub fn percentage_saved(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            (self.bytes_saved() as f64 / self.original_size as f64) * 100.0
        }
    }
}
