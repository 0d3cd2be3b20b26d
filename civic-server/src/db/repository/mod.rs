//! Repository Module
//!
//! Provides the report store contract and its SurrealDB implementation.

pub mod issue;

pub use issue::IssueRepository;

use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use shared::models::IssueReport;
use thiserror::Error;

use crate::db::models::NewIssue;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::ReportNotFound, msg),
            RepoError::Validation(msg) => AppError::with_message(ErrorCode::InvalidReportId, msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Report store contract
///
/// Identifiers are the plain record keys handed out by the store.
#[async_trait]
pub trait IssueStore: Send + Sync + std::fmt::Debug {
    /// Insert a report; the store assigns the identifier
    async fn insert(&self, issue: NewIssue) -> RepoResult<IssueReport>;

    /// All reports, newest first
    async fn find_all(&self) -> RepoResult<Vec<IssueReport>>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<IssueReport>>;

    /// Overwrite the status of one report
    ///
    /// Returns [`RepoError::NotFound`] when no report has this id.
    async fn update_status(&self, id: &str, status: &str) -> RepoResult<IssueReport>;

    async fn count(&self) -> RepoResult<usize>;

    /// Remove every report, returning how many were removed
    async fn clear(&self) -> RepoResult<usize>;
}

/// Longest record key accepted from clients
pub const MAX_ID_LEN: usize = 64;

/// Whether `id` is a syntactically valid record key
///
/// Store-generated keys are short ASCII alphanumerics; anything else is
/// rejected before it reaches the query layer.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Reject malformed ids with [`RepoError::Validation`]
pub fn ensure_valid_id(id: &str) -> RepoResult<()> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(RepoError::Validation(format!("Invalid report id: {id}")))
    }
}
