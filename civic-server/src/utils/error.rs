//! 统一错误处理
//!
//! 错误类型定义在 `shared::error`，这里补充 axum 提取器拒绝的转换。
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::new(ErrorCode::ReportNotFound))
//!
//! // multipart 解析失败
//! multipart.next_field().await.map_err(multipart_error)?;
//! ```

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use http::StatusCode;

pub use shared::error::{AppError, ErrorBody, ErrorCategory, ErrorCode};

/// Map a multipart stream failure onto a client error
///
/// Body-limit overruns surface here as 413.
pub fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::with_message(ErrorCode::FileTooLarge, e.body_text());
    }
    AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {}", e))
}

/// Map a request that is not a readable multipart form onto "No file part"
///
/// A missing or non-multipart body carries no file, so it is reported the
/// same way as a form without a `file` field.
pub fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    AppError::new(ErrorCode::NoFileProvided).with_detail("reason", rejection.body_text())
}

/// Map a JSON body rejection onto a client error
pub fn json_error(rejection: JsonRejection) -> AppError {
    AppError::with_message(ErrorCode::InvalidFormat, rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::{FromRequest, Multipart};
    use http::Request;

    #[tokio::test]
    async fn test_non_multipart_body_is_no_file() {
        let request = Request::post("/issues")
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let rejection = Multipart::from_request(request, &()).await.unwrap_err();
        let err = multipart_rejection(rejection);

        assert_eq!(err.code, ErrorCode::NoFileProvided);
        assert_eq!(err.message, "No file part");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert!(err.details.unwrap().contains_key("reason"));
    }
}
