use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("barkive_statds")
        .with_description("Barkive app statistics")
        .with_unit("attempt")
        .build()
});

fn incr_statds(metric: String, value: String) {
    STATDS.add(1, &[KeyValue::new(metric, value)]);
}

pub fn incr_user_action_statds(action: &str) {
    incr_statds("user_action".to_string(), action.into())
}

/// Counts a write on one of the pet collections, e.g. `activityLogs:add`
pub fn incr_record_write_statds(collection: &str, action: &str) {
    incr_statds("record_write".to_string(), format!("{collection}:{action}"))
}

pub fn incr_care_tips_statds(status: &str) {
    incr_statds("care_tips".to_string(), status.into())
}
