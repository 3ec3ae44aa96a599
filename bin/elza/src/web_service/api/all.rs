use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use readings::Store;

#[derive(Debug, Deserialize)]
pub struct AllParams {
    #[serde(default = "default_max")]
    max: usize,
}

fn default_max() -> usize {
    1000
}

pub async fn all(
    State(store): State<Arc<Store>>,
    Query(params): Query<AllParams>,
) -> Json<Value> {
    let data = store.tail(params.max).await;

    Json(json!({"status": "ok", "data": data}))
}
