//! Dispatch metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a single dispatcher
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Total successful publishes
    published_count: AtomicU64,
    /// Total publish failures (including serialize failures)
    publish_failure_count: AtomicU64,
    /// Total queue declare failures
    declare_failure_count: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get published count
    pub fn published_count(&self) -> u64 {
        self.published_count.load(Ordering::Relaxed)
    }

    /// Increment published count
    pub fn inc_published_count(&self) {
        self.published_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get publish failure count
    pub fn publish_failure_count(&self) -> u64 {
        self.publish_failure_count.load(Ordering::Relaxed)
    }

    /// Increment publish failure count
    pub fn inc_publish_failure_count(&self) {
        self.publish_failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get queue declare failure count
    pub fn declare_failure_count(&self) -> u64 {
        self.declare_failure_count.load(Ordering::Relaxed)
    }

    /// Increment queue declare failure count
    pub fn inc_declare_failure_count(&self) {
        self.declare_failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            published_count: self.published_count(),
            publish_failure_count: self.publish_failure_count(),
            declare_failure_count: self.declare_failure_count(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub published_count: u64,
    pub publish_failure_count: u64,
    pub declare_failure_count: u64,
}
