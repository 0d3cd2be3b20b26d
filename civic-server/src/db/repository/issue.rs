//! Issue Repository

use async_trait::async_trait;
use serde::Deserialize;
use shared::models::IssueReport;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use super::{IssueStore, RepoError, RepoResult, ensure_valid_id};
use crate::db::models::{IssueRecord, IssueStatusPatch, NewIssue};

const TABLE: &str = "issues";

#[derive(Debug, Deserialize)]
struct CountRow {
    count: usize,
}

/// SurrealDB-backed report store
#[derive(Clone, Debug)]
pub struct IssueRepository {
    db: Surreal<Any>,
}

impl IssueRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    async fn find_record(&self, id: &str) -> RepoResult<Option<IssueRecord>> {
        ensure_valid_id(id)?;
        let record: Option<IssueRecord> = self.db.select((TABLE, id)).await?;
        Ok(record)
    }
}

#[async_trait]
impl IssueStore for IssueRepository {
    async fn insert(&self, issue: NewIssue) -> RepoResult<IssueReport> {
        let created: Option<IssueRecord> = self.db.create(TABLE).content(issue).await?;
        created
            .map(IssueRecord::into_report)
            .ok_or_else(|| RepoError::Database("Failed to create issue".to_string()))
    }

    async fn find_all(&self) -> RepoResult<Vec<IssueReport>> {
        let records: Vec<IssueRecord> = self
            .db
            .query(format!("SELECT * FROM {TABLE} ORDER BY createdAt DESC"))
            .await?
            .take(0)?;
        Ok(records.into_iter().map(IssueRecord::into_report).collect())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<IssueReport>> {
        Ok(self.find_record(id).await?.map(IssueRecord::into_report))
    }

    async fn update_status(&self, id: &str, status: &str) -> RepoResult<IssueReport> {
        if self.find_record(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Report {} not found", id)));
        }

        let patch = IssueStatusPatch {
            status: status.to_string(),
        };
        let updated: Option<IssueRecord> = self.db.update((TABLE, id)).merge(patch).await?;

        updated
            .map(IssueRecord::into_report)
            .ok_or_else(|| RepoError::NotFound(format!("Report {} not found", id)))
    }

    async fn count(&self) -> RepoResult<usize> {
        let row: Option<CountRow> = self
            .db
            .query(format!("SELECT count() FROM {TABLE} GROUP ALL"))
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    async fn clear(&self) -> RepoResult<usize> {
        let removed: Vec<IssueRecord> = self.db.delete(TABLE).await?;
        Ok(removed.len())
    }
}
