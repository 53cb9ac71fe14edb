//! Telemetry utilities for engine timing and span correlation.

use std::time::Instant;

/// Guard for timing an ISUPPORT rebuild.
///
/// Records rebuild latency when dropped.
pub struct RebuildTimer {
    start: Instant,
}

impl RebuildTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for RebuildTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RebuildTimer {
    fn drop(&mut self) {
        crate::metrics::record_rebuild(self.start.elapsed().as_secs_f64());
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, debug_span, info_span};

    /// Span for a token rebuild over `classes` configured classes.
    pub fn rebuild(classes: usize) -> Span {
        info_span!("isupport_rebuild", classes = classes)
    }

    /// Span for one batch lifecycle step.
    pub fn batch(kind: &str, reftag: &str) -> Span {
        debug_span!("batch", kind = %kind, reftag = %reftag)
    }
}
