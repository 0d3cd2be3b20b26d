//! Civic Eye Server - 市民问题上报后端
//!
//! # 架构概述
//!
//! 市民拍照上报道路问题 (坑洼、垃圾、路灯损坏)，服务端保存图片、
//! 自动分类并记录位置，管理端查看列表并更新处理状态。
//!
//! - **问题上报** (`services/issue_lifecycle`): 受理、分类、查询、状态变更
//! - **分类器** (`classifier`): 图片分类能力 (当前为占位实现)
//! - **存储** (`storage`): 上传图片目录
//! - **数据库** (`db`): SurrealDB 存储
//! - **HTTP API** (`api`): REST 接口
//!
//! # 模块结构
//!
//! ```text
//! civic-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── services/      # 问题上报服务、HTTP 服务
//! ├── classifier/    # 图片分类
//! ├── storage/       # 上传文件
//! ├── db/            # 数据库层
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod classifier;
pub mod core;
pub mod db;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use services::{HttpService, IssueService};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 `.env`、读取配置、初始化日志
///
/// 配置无效时返回错误，此时日志尚未初始化。
pub fn setup_environment() -> AppResult<Config> {
    // .env 不存在时忽略
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    if let Some(dir) = &config.log_dir
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!("Failed to create log directory {}: {}", dir, e);
    }

    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   _____ _       _         ______
  / ____(_)     (_)       |  ____|
 | |     ___   ___  ___   | |__  _   _  ___
 | |    | \ \ / / |/ __|  |  __|| | | |/ _ \
 | |____| |\ V /| | (__   | |___| |_| |  __/
  \_____|_| \_/ |_|\___|  |______\__, |\___|
                                  __/ |
                                 |___/
    "#
    );
}
