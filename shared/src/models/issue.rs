//! Issue Report Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to every report at creation
pub const STATUS_PENDING: &str = "Pending";

/// GPS coordinates attached to a report
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Issue report as returned by `GET /issues`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    /// Store-assigned identifier, always a plain string on the wire
    #[serde(rename = "_id")]
    pub id: String,
    pub image_url: String,
    pub location: GeoLocation,
    pub status: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Creation time (UTC)
    pub timestamp: DateTime<Utc>,
}

/// Response of `POST /issues`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCreated {
    pub message: String,
    pub id: String,
    pub category: String,
    pub image_url: String,
}

/// Body of `PATCH /issues/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub category: String,
}

/// Plain confirmation body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
