//! Classification preview
//!
//! `POST /predict` runs the classifier on an upload and discards it. Nothing
//! is persisted.

use axum::{
    Json, Router,
    extract::{Multipart, State, multipart::MultipartRejection},
    routing::post,
};
use shared::models::Prediction;

use crate::api::form::read_file_form;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::error::multipart_rejection;

pub fn router() -> Router<ServerState> {
    Router::new().route("/predict", post(predict))
}

/// POST /predict
pub async fn predict(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Prediction>> {
    let file = read_file_form(multipart.map_err(multipart_rejection)?).await?;
    let prediction = state.issues.classify_only(file).await?;
    Ok(Json(prediction))
}
