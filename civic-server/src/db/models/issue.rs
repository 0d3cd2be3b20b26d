//! Issue Record Model
//!
//! 存储层的报告文档。对外的 JSON 形状见 `shared::models::IssueReport`。

use serde::{Deserialize, Serialize};
use shared::models::{GeoLocation, IssueReport};
use surrealdb::RecordId;

/// Issue document as stored in the `issues` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub id: RecordId,
    pub image_url: String,
    #[serde(default)]
    pub location: GeoLocation,
    pub status: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// 创建时间 (Unix millis)
    pub created_at: i64,
}

impl IssueRecord {
    /// Wire representation with the record key as a plain string id
    pub fn into_report(self) -> IssueReport {
        IssueReport {
            id: self.id.key().to_string(),
            image_url: self.image_url,
            location: self.location,
            status: self.status,
            category: self.category,
            description: self.description,
            timestamp: shared::util::millis_to_datetime(self.created_at),
        }
    }
}

/// Issue payload for creation (id assigned by the store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub image_url: String,
    pub location: GeoLocation,
    pub status: String,
    pub category: String,
    pub description: String,
    pub created_at: i64,
}

/// Status patch merged into an existing record
#[derive(Debug, Clone, Serialize)]
pub struct IssueStatusPatch {
    pub status: String,
}
