//! Dispatch metrics recording
//!
//! Counter helpers for callers of the dispatch core. Call after each dispatch
//! outcome to keep the exported series in step with the boolean results.

use contracts::DispatchTarget;
use metrics::counter;

/// Record a successfully published command, labeled by target kind
pub fn record_command_published(target: &DispatchTarget) {
    counter!("roomcast_commands_published_total", "target" => target_kind(target)).increment(1);
}

/// Record a failed publish on an exchange
pub fn record_publish_failure(exchange: &str) {
    counter!("roomcast_publish_failures_total", "exchange" => exchange.to_string()).increment(1);
}

/// Record a failed queue declare
pub fn record_queue_declare_failure(queue: &str) {
    counter!("roomcast_queue_declare_failures_total", "queue" => queue.to_string()).increment(1);
}

fn target_kind(target: &DispatchTarget) -> &'static str {
    match target {
        DispatchTarget::Computer { .. } => "computer",
        DispatchTarget::Room { .. } => "room",
        DispatchTarget::NamedQueue { .. } => "queue",
    }
}
