use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use readings::Store;

use crate::web_service::ServiceError;
use crate::Error;

/// Streams the XLSX mirror back verbatim.
pub async fn xlsx(State(store): State<Arc<Store>>) -> Result<Response, ServiceError> {
    if store.is_empty().await {
        return Ok((StatusCode::NOT_FOUND, "No data").into_response());
    }

    let contents = tokio::fs::read(store.xlsx_path())
        .await
        .map_err(Error::Io)?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sensor_data.xlsx\"",
            ),
        ],
        contents,
    )
        .into_response())
}
