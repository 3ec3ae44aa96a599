mod index;
mod ingest;

mod api {
    mod all;
    mod latest;

    pub use all::all;
    pub use latest::latest;
}

mod download {
    mod csv;
    mod xlsx;

    pub use csv::csv;
    pub use xlsx::xlsx;
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use log::error;
use tower_http::cors::CorsLayer;

use readings::Store;

use crate::Error;

pub struct ServiceError(Error, uuid::Uuid);

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response<Body> {
        error!("ServiceError[{}]: {}", self.1, self.0);

        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

impl From<Error> for ServiceError {
    fn from(value: Error) -> Self {
        ServiceError(value, uuid::Uuid::new_v4())
    }
}

pub fn router(store: Arc<Store>) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/data", post(ingest::ingest))
        .route("/api/latest", get(api::latest))
        .route("/api/all", get(api::all))
        .route("/download/csv", get(download::csv))
        .route("/download/xlsx", get(download::xlsx))
        .layer(CorsLayer::permissive())
        .with_state(store)
}
