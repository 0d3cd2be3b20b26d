//! Database Module
//!
//! Handles the SurrealDB connection. The engine is picked from the
//! connection string, so the same code runs against an embedded RocksDB
//! file, an in-memory store, or a remote server.

pub mod models;
pub mod repository;

use crate::core::Config;
use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};

/// Database service, owns a SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Any>,
}

impl DbService {
    /// Connect and select namespace/database
    pub async fn new(url: &str, namespace: &str, database: &str) -> Result<Self, AppError> {
        let db = any::connect(url)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        tracing::info!(
            engine = %engine_name(url),
            namespace = %namespace,
            database = %database,
            "Database connection established"
        );

        Ok(Self { db })
    }

    /// Connect using the server configuration
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.database_url, &config.db_namespace, &config.db_name).await
    }

    /// In-memory store for tests and local experiments
    pub async fn in_memory() -> Result<Self, AppError> {
        Self::new("mem://", "civic_eye", "civic_eye_test").await
    }
}

/// Scheme part of a connection string, never the credentials
fn engine_name(url: &str) -> &str {
    url.split_once("://").map(|(scheme, _)| scheme).unwrap_or("unknown")
}
