//! Issue Report API Handlers

use axum::{
    Json,
    extract::{
        Multipart, Path, State, multipart::MultipartRejection, rejection::JsonRejection,
    },
};
use http::HeaderMap;
use shared::models::{IssueCreated, IssueReport, MessageResponse, StatusUpdate};

use crate::api::form::read_report_form;
use crate::api::request_base_url;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::error::{json_error, multipart_rejection};

/// POST /issues - 上报问题
pub async fn create(
    State(state): State<ServerState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<IssueCreated>> {
    let request = read_report_form(multipart.map_err(multipart_rejection)?).await?;
    let base_url = request_base_url(state.config.api_base_url.as_deref(), &headers);

    let created = state.issues.create_report(request, &base_url).await?;
    Ok(Json(created))
}

/// GET /issues - 全部问题 (最新在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<IssueReport>>> {
    let reports = state.issues.list_reports().await?;
    Ok(Json(reports))
}

/// PATCH /issues/{id} - 更新状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(payload) = payload.map_err(json_error)?;
    let response = state
        .issues
        .update_status(&id, payload.status.as_deref())
        .await?;
    Ok(Json(response))
}
