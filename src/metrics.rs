//! Prometheus metrics for the ISUPPORT and batch engines.
//!
//! Nothing here is exported over HTTP; an embedding server scrapes
//! [`gather_metrics`] however it likes. Recording before [`init`] is a no-op,
//! which keeps unit tests free of global setup.
//!
//! - `isupport_rebuilds_total` - Completed token rebuilds
//! - `isupport_rebuild_duration_seconds` - Rebuild latency histogram
//! - `isupport_lines_sent_total{kind}` - 005 lines queued, `full` or `diff`
//! - `batch_started_total` - Batches that entered the running state
//! - `batch_refused_total{reason}` - Refused starts, `shutdown` or `exhausted`
//! - `batch_active` - Running batches (gauge)
//! - `session_delivery_failures_total{reason}` - Frames a session queue refused

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// ISUPPORT
// ========================================================================

/// Completed rebuilds.
pub static ISUPPORT_REBUILDS: OnceLock<IntCounter> = OnceLock::new();

/// Time spent in a rebuild, including diff pushes.
pub static ISUPPORT_REBUILD_LATENCY: OnceLock<Histogram> = OnceLock::new();

/// 005 lines queued to sessions by kind.
pub static ISUPPORT_LINES_SENT: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Batches
// ========================================================================

pub static BATCH_STARTED: OnceLock<IntCounter> = OnceLock::new();

/// Starts refused by reason.
pub static BATCH_REFUSED: OnceLock<IntCounterVec> = OnceLock::new();

/// Currently running batches.
pub static BATCH_ACTIVE: OnceLock<IntGauge> = OnceLock::new();

// ========================================================================
// Sessions
// ========================================================================

/// Frames dropped because a session queue refused them.
pub static DELIVERY_FAILURES: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Idempotent; later calls find every slot already filled.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(ISUPPORT_REBUILDS, IntCounter::new("isupport_rebuilds_total", "Completed ISUPPORT rebuilds"));
    register!(ISUPPORT_REBUILD_LATENCY, Histogram::with_opts(
        HistogramOpts::new("isupport_rebuild_duration_seconds", "ISUPPORT rebuild latency")
            .buckets(vec![0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5])));
    register!(ISUPPORT_LINES_SENT, IntCounterVec::new(Opts::new("isupport_lines_sent_total", "ISUPPORT lines queued to sessions"), &["kind"]));

    register!(BATCH_STARTED, IntCounter::new("batch_started_total", "Batches started"));
    register!(BATCH_REFUSED, IntCounterVec::new(Opts::new("batch_refused_total", "Batch starts refused"), &["reason"]));
    register!(BATCH_ACTIVE, IntGauge::new("batch_active", "Running batches"));

    register!(DELIVERY_FAILURES, IntCounterVec::new(Opts::new("session_delivery_failures_total", "Frames refused by a session queue"), &["reason"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Recording helpers
// ============================================================================

/// Record a finished rebuild.
#[inline]
pub fn record_rebuild(duration_secs: f64) {
    if let Some(c) = ISUPPORT_REBUILDS.get() {
        c.inc();
    }
    if let Some(h) = ISUPPORT_REBUILD_LATENCY.get() {
        h.observe(duration_secs);
    }
}

/// Record `count` 005 lines queued; `kind` is `full` or `diff`.
#[inline]
pub fn record_isupport_lines(kind: &str, count: usize) {
    if let Some(c) = ISUPPORT_LINES_SENT.get() {
        c.with_label_values(&[kind]).inc_by(count as u64);
    }
}

#[inline]
pub fn record_batch_started() {
    if let Some(c) = BATCH_STARTED.get() {
        c.inc();
    }
}

/// Record a refused start; `reason` is `shutdown` or `exhausted`.
#[inline]
pub fn record_batch_refused(reason: &str) {
    if let Some(c) = BATCH_REFUSED.get() {
        c.with_label_values(&[reason]).inc();
    }
}

/// Update the running-batch gauge.
#[inline]
pub fn set_active_batches(count: usize) {
    if let Some(g) = BATCH_ACTIVE.get() {
        g.set(count as i64);
    }
}

#[inline]
pub fn record_delivery_failure(reason: &str) {
    if let Some(c) = DELIVERY_FAILURES.get() {
        c.with_label_values(&[reason]).inc();
    }
}
