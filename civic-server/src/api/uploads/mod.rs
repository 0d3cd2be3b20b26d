//! Upload Routes
//!
//! Serves stored report photos. Public access.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use http::header;

use crate::core::ServerState;
use crate::utils::AppResult;

/// Build upload router
pub fn router() -> Router<ServerState> {
    Router::new().route("/uploads/{filename}", get(serve_uploaded_file))
}

/// Serve uploaded file handler
async fn serve_uploaded_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(filename = %filename, "Serving upload");

    // Rejects traversal before touching the filesystem
    let content = state.storage().read(&filename).await?;
    let mime = mime_guess::from_path(&filename).first_or_octet_stream();

    Ok((
        [(header::CONTENT_TYPE, mime.essence_str().to_string())],
        Bytes::from(content),
    ))
}
