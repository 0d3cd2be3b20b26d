//! Multipart form reading shared by the report and predict endpoints

use axum::extract::Multipart;

use crate::services::{CreateIssueRequest, UploadedFile};
use crate::utils::AppResult;
use crate::utils::error::multipart_error;

/// Form field carrying the photo
const FILE_FIELD: &str = "file";

/// Drain a multipart body into a report request
///
/// Unknown fields are skipped. When a field repeats, the last one wins.
pub async fn read_report_form(mut multipart: Multipart) -> AppResult<CreateIssueRequest> {
    let mut request = CreateIssueRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            FILE_FIELD => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                request.file = Some(UploadedFile::new(filename, data));
            }
            "lat" | "lng" | "description" | "category" => {
                let value = field.text().await.map_err(multipart_error)?;
                match name.as_str() {
                    "lat" => request.lat = Some(value),
                    "lng" => request.lng = Some(value),
                    "description" => request.description = Some(value),
                    _ => request.category = Some(value),
                }
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown form field");
            }
        }
    }

    Ok(request)
}

/// Drain a multipart body, keeping only the photo
pub async fn read_file_form(multipart: Multipart) -> AppResult<Option<UploadedFile>> {
    Ok(read_report_form(multipart).await?.file)
}
