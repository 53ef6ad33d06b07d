//! Metrics recording for the `SQLite` message store.
//!
//! Recorded through the `metrics` facade; without an installed recorder every
//! call is a no-op.

use std::time::Instant;

const BACKEND: &str = "sqlite";

/// Records count and latency for one store operation.
///
/// - `storage_operations_total` - counter by operation and status
/// - `storage_operation_duration_ms` - latency histogram
pub fn record_operation_metrics(operation: &'static str, start: Instant, status: &'static str) {
    metrics::counter!(
        "storage_operations_total",
        "backend" => BACKEND,
        "operation" => operation,
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "storage_operation_duration_ms",
        "backend" => BACKEND,
        "operation" => operation,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}

/// Maps a result to the `status` label.
pub const fn status_label<T, E>(result: &Result<T, E>) -> &'static str {
    if result.is_ok() { "success" } else { "error" }
}

/// Counts a relevance query that fell back to the range scan.
pub fn record_fallback(reason: &'static str) {
    metrics::counter!("fts_fallback_total", "reason" => reason).increment(1);
}

/// Counts a mirror insert that failed after a successful primary insert.
pub fn record_mirror_failure() {
    metrics::counter!("fts_mirror_failures_total").increment(1);
}
