use std::fmt;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Local, NaiveDateTime};
use log::{debug, error};
use serde_json::{json, Map, Value};

use readings::{parse_timestamp, Reading, Store};

use crate::Error;

/// Sensors post JSON like `{"temperature": 25.2, "humidity": 60.3, "timestamp": "..."}`.
///
/// The body is parsed as JSON whatever the content type. A missing or
/// unparseable body is a 400; a missing or uncoercible temperature/humidity
/// is a 500; a malformed timestamp is silently replaced with the current
/// time and never fails the request.
pub async fn ingest(
    State(store): State<Arc<Store>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let content = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(content)) if !content.is_empty() => content,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"status": "error", "message": "No JSON"})),
            )
        }
    };

    let temperature = match coerce_to_float("temperature", &content) {
        Ok(value) => value,
        Err(err) => return server_error(err),
    };

    let humidity = match coerce_to_float("humidity", &content) {
        Ok(value) => value,
        Err(err) => return server_error(err),
    };

    let reading = Reading {
        timestamp: normalize_timestamp(content.get("timestamp")),
        temperature,
        humidity,
    };

    match store.append(reading).await {
        Ok(()) => (StatusCode::OK, Json(json!({"status": "ok"}))),
        Err(err) => server_error(Error::Store(err)),
    }
}

fn server_error(err: impl fmt::Display) -> (StatusCode, Json<Value>) {
    let err = err.to_string();
    error!("unable to ingest reading: {err}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"status": "error", "error": err})),
    )
}

// older firmware quotes its floats, so numeric strings are accepted too
fn coerce_to_float(field: &str, content: &Map<String, Value>) -> Result<f64, String> {
    match content.get(field) {
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| format!("{field} is out of range")),
        Some(Value::String(string)) => string
            .trim()
            .parse()
            .map_err(|_| format!("could not convert string to float: '{string}'")),
        Some(value) => Err(format!("{field} is not a number: {value}")),
        None => Err(format!("missing {field}")),
    }
}

fn normalize_timestamp(value: Option<&Value>) -> NaiveDateTime {
    match value.and_then(Value::as_str) {
        Some(value) => parse_timestamp(value).unwrap_or_else(|| {
            debug!("unparseable timestamp {value:?}, falling back to current time");
            Local::now().naive_local()
        }),
        None => Local::now().naive_local(),
    }
}
