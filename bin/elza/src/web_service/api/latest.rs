use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use readings::Store;

pub async fn latest(State(store): State<Arc<Store>>) -> Json<Value> {
    match store.latest().await {
        Some(reading) => Json(json!({"status": "ok", "data": reading})),
        None => Json(json!({"status": "empty", "data": []})),
    }
}
