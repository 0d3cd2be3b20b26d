//! 进程级错误
//!
//! 请求处理中的错误使用 [`AppError`]；这里只描述启动和运行期致命错误。

use thiserror::Error;

use crate::utils::AppError;

#[derive(Error, Debug)]
pub enum ServerError {
    /// 配置、数据库或上传目录初始化失败
    #[error("启动失败: {0}")]
    Startup(#[from] AppError),

    /// HTTP 服务异常退出
    #[error("服务器错误: {0}")]
    Serve(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
