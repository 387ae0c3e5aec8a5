//! Feed assembly metrics.

use metrics::counter;

/// Registers the feed metrics.
pub fn register_feed_metrics() {
    metrics::describe_counter!(
        "mapfeed_creator_name_backfills_total",
        "Creator names resolved and written back onto map records"
    );
    metrics::describe_counter!(
        "mapfeed_creator_name_failures_total",
        "Creator name resolutions that failed and were served without a name"
    );
}

/// A creator name was denormalized onto a record.
pub fn record_backfill() {
    counter!("mapfeed_creator_name_backfills_total").increment(1);
}

/// A creator name could not be resolved or persisted.
pub fn record_backfill_failure(stage: &'static str) {
    counter!("mapfeed_creator_name_failures_total", "stage" => stage).increment(1);
}
