//! Generation counters.

use crate::domain::ResourceKind;
use crate::random::GeneratorError;

/// Count a successful generation.
pub fn record_generated(kind: ResourceKind) {
    metrics::counter!("random_generated_total", "kind" => kind.as_str()).increment(1);
}

/// Count a failed generation by reason.
pub fn record_failure(kind: ResourceKind, err: &GeneratorError) {
    metrics::counter!(
        "random_generation_failures_total",
        "kind" => kind.as_str(),
        "reason" => err.reason()
    )
    .increment(1);
}
