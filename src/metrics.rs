//! Voice note parsing metrics
//!
//! Recorded through the `metrics` facade. This crate installs no recorder, so
//! every call is a no-op until the embedding application installs one.

use crate::types::QualityFlag;

/// Trait for a group of metrics that share a naming prefix
pub trait PhaseMetrics {
    /// Touch every metric once so a recorder knows about it up front
    fn register_metrics();

    fn phase_name() -> &'static str;

    fn metrics_documentation() -> Vec<MetricDoc>;
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Naming convention: crm_{phase}_{metric_name}[_total]
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("crm_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("crm_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;

/// Metrics for `VoiceNoteParser::parse`
pub struct VoiceNoteMetrics;

impl VoiceNoteMetrics {
    /// Record a validated parse
    pub fn record_parse_success(confidence: f64, flags: &[QualityFlag], deal_detected: bool) {
        ::metrics::counter!(phase_metric!(counter, "parse", "success")).increment(1);
        ::metrics::histogram!(phase_metric!(histogram, "parse", "confidence")).record(confidence);

        for flag in flags {
            ::metrics::counter!(phase_metric!(counter, "flags", "raised"), "flag" => flag.label()).increment(1);
        }

        if deal_detected {
            ::metrics::counter!(phase_metric!(counter, "deals", "detected")).increment(1);
        }
    }

    /// Record a parse whose record failed validation
    pub fn record_parse_failure(error_count: usize) {
        ::metrics::counter!(phase_metric!(counter, "parse", "failure")).increment(1);
        tracing::debug!(error_count, "Recorded parse failure");
    }
}

impl PhaseMetrics for VoiceNoteMetrics {
    fn register_metrics() {
        use ::metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "parse", "success"));
        let _ = counter!(phase_metric!(counter, "parse", "failure"));
        let _ = counter!(phase_metric!(counter, "flags", "raised"));
        let _ = counter!(phase_metric!(counter, "deals", "detected"));
        let _ = histogram!(phase_metric!(histogram, "parse", "confidence"));
    }

    fn phase_name() -> &'static str {
        "parse"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "parse", "success"),
                metric_type: MetricType::Counter,
                help: "Transcripts parsed into a validated record",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "parse", "failure"),
                metric_type: MetricType::Counter,
                help: "Transcripts whose record failed schema validation",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "parse", "confidence"),
                metric_type: MetricType::Histogram,
                help: "Confidence score of validated records",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "flags", "raised"),
                metric_type: MetricType::Counter,
                help: "Data-quality flags raised on validated records",
                labels: vec!["flag"],
            },
            MetricDoc {
                name: phase_metric!(counter, "deals", "detected"),
                metric_type: MetricType::Counter,
                help: "Validated records that carry a deal",
                labels: vec![],
            },
        ]
    }
}
