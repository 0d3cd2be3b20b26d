//! HTTP API
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /issues | POST | 上报问题 (multipart) |
//! | /issues | GET | 全部问题，最新在前 |
//! | /issues/{id} | PATCH | 更新状态 |
//! | /predict | POST | 仅分类，不保存 |
//! | /uploads/{filename} | GET | 读取上传的图片 |
//! | /health | GET | 健康检查 |
//!
//! 所有路由均为公开访问。

pub mod form;
pub mod health;
pub mod issues;
pub mod predict;
pub mod uploads;

use http::HeaderMap;
use http::header::HOST;

/// Header set by reverse proxies terminating TLS
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Externally visible origin of the current request
///
/// A configured base URL wins. Otherwise the origin is rebuilt from the
/// `Host` and `X-Forwarded-Proto` headers, defaulting to plain http.
pub fn request_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = configured {
        return base.trim_end_matches('/').to_string();
    }

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let scheme = header(FORWARDED_PROTO)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .unwrap_or("http");
    let host = header(HOST.as_str()).unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_configured_base_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("10.0.0.2:5000"));
        assert_eq!(
            request_base_url(Some("https://civic.example.org/"), &headers),
            "https://civic.example.org"
        );
    }

    #[test]
    fn test_base_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("192.168.1.5:5000"));
        assert_eq!(request_base_url(None, &headers), "http://192.168.1.5:5000");

        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("https, http"));
        assert_eq!(request_base_url(None, &headers), "https://192.168.1.5:5000");
    }

    #[test]
    fn test_base_without_host() {
        assert_eq!(request_base_url(None, &HeaderMap::new()), "http://localhost");
    }
}
