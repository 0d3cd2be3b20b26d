use std::path::PathBuf;

use crate::utils::{AppError, AppResult};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | (必填) | SurrealDB 连接串 (`rocksdb://data/civic.db`, `mem://`, `ws://host:8000`) |
/// | DB_NAMESPACE | civic_eye | 命名空间 |
/// | DB_NAME | civic_eye_db | 数据库名 |
/// | API_BASE_URL | (空) | 图片链接的对外地址，未设置时取请求 Host |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | UPLOAD_DIR | uploads | 上传目录 |
/// | MAX_UPLOAD_BYTES | 10485760 | 上传请求体上限 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 日志 |
/// | LOG_DIR | (空) | 日志文件目录 (按天滚动) |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=rocksdb://data/civic.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SurrealDB connection string
    pub database_url: String,
    pub db_namespace: String,
    pub db_name: String,
    /// Externally visible base URL used to build image links
    pub api_base_url: Option<String>,
    pub http_port: u16,
    /// Flat directory holding uploaded images
    pub upload_dir: String,
    pub max_upload_bytes: usize,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

pub const DEFAULT_HTTP_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl Config {
    /// 从环境变量加载配置
    ///
    /// `DATABASE_URL` 缺失时返回 `ConfigError`，其余项使用默认值
    pub fn from_env() -> AppResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = non_empty("DATABASE_URL").ok_or_else(|| {
            AppError::config("No DATABASE_URL found in environment variables")
        })?;

        Ok(Self {
            database_url,
            db_namespace: non_empty("DB_NAMESPACE").unwrap_or_else(|| "civic_eye".into()),
            db_name: non_empty("DB_NAME").unwrap_or_else(|| "civic_eye_db".into()),
            api_base_url: non_empty("API_BASE_URL"),
            http_port: non_empty("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_HTTP_PORT),
            upload_dir: non_empty("UPLOAD_DIR").unwrap_or_else(|| "uploads".into()),
            max_upload_bytes: non_empty("MAX_UPLOAD_BYTES")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: non_empty("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: non_empty("LOG_DIR"),
        })
    }

    /// Config for tests: in-memory store, given upload dir
    pub fn for_tests(upload_dir: impl Into<String>) -> Self {
        Self {
            database_url: "mem://".into(),
            db_namespace: "civic_eye".into(),
            db_name: "civic_eye_test".into(),
            api_base_url: None,
            http_port: DEFAULT_HTTP_PORT,
            upload_dir: upload_dir.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            environment: "test".into(),
            log_level: "debug".into(),
            log_json: false,
            log_dir: None,
        }
    }

    /// 上传目录
    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.upload_dir)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
