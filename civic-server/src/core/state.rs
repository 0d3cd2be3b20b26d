use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use crate::classifier::{ImageClassifier, PlaceholderClassifier};
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{IssueRepository, IssueStore};
use crate::services::IssueService;
use crate::storage::UploadStorage;
use crate::utils::AppResult;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是浅拷贝，可直接作为 axum 的 `State`。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Any> | 数据库连接 |
/// | issues | IssueService | 问题上报服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库连接 (SurrealDB)
    pub db: Surreal<Any>,
    /// 问题上报服务
    pub issues: IssueService,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, db: Surreal<Any>, issues: IssueService) -> Self {
        Self { config, db, issues }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 上传目录 (不存在则创建)
    /// 2. 数据库连接
    /// 3. 分类器与问题上报服务
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let classifier: Arc<dyn ImageClassifier> = Arc::new(PlaceholderClassifier::new());
        Self::initialize_with_classifier(config, classifier).await
    }

    /// 同 [`initialize()`](Self::initialize)，但使用指定的分类器
    pub async fn initialize_with_classifier(
        config: &Config,
        classifier: Arc<dyn ImageClassifier>,
    ) -> AppResult<Self> {
        let storage = UploadStorage::new(config.upload_dir());
        storage.ensure_dir().await?;

        let db_service = DbService::from_config(config).await?;
        let db = db_service.db;

        let store: Arc<dyn IssueStore> = Arc::new(IssueRepository::new(db.clone()));
        let issues = IssueService::new(store, classifier, storage);

        tracing::info!(
            upload_dir = %config.upload_dir,
            environment = %config.environment,
            "Server state initialized"
        );

        Ok(Self::new(config.clone(), db, issues))
    }

    /// 上传文件存储
    pub fn storage(&self) -> &UploadStorage {
        self.issues.storage()
    }
}
