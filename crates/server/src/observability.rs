use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static ANIMALS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "animal_shelter_animals_created_total",
        "Animal records created"
    )
    .expect("register animals_created_total")
});

pub static CREATE_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "animal_shelter_create_rejected_total",
        "Create submissions rejected by validation"
    )
    .expect("register create_rejected_total")
});

pub static ANIMALS_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "animal_shelter_animals_updated_total",
        "Update submissions that matched a record"
    )
    .expect("register animals_updated_total")
});

pub static ANIMALS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "animal_shelter_animals_deleted_total",
        "Delete submissions that removed a record"
    )
    .expect("register animals_deleted_total")
});

/// Force registration so every counter shows up before its first increment.
pub fn init_metrics() {
    Lazy::force(&ANIMALS_CREATED_TOTAL);
    Lazy::force(&CREATE_REJECTED_TOTAL);
    Lazy::force(&ANIMALS_UPDATED_TOTAL);
    Lazy::force(&ANIMALS_DELETED_TOTAL);
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
