//! Export handler.
//!
//! Applies the posted selection and sort to the posted models, then encodes
//! the resulting view. Clipboard exports come back inline; the rest carry a
//! download file name.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use omx_core::{ModelItem, build_export, filter_view, sorted};

use crate::dto::ExportRequest;
use crate::error::HttpError;

pub async fn export(payload: Result<Json<ExportRequest>, JsonRejection>) -> Result<Response, HttpError> {
    let Json(request) = payload?;

    let items: Vec<ModelItem> = request
        .models
        .into_iter()
        .map(|raw| ModelItem::from_raw(raw, ""))
        .collect();
    let view = sorted(filter_view(&items, &request.filters), request.sort);

    let document = build_export(request.format, &view, &request.filters)?;
    let content_type = format!("{}; charset=utf-8", document.mime_type);

    let response = match document.file_name {
        Some(file_name) => (
            [
                (header::CONTENT_TYPE, content_type),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{file_name}\""),
                ),
            ],
            document.content,
        )
            .into_response(),
        None => ([(header::CONTENT_TYPE, content_type)], document.content).into_response(),
    };
    Ok(response)
}
