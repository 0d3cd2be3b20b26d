//! Database models

pub mod issue;

pub use issue::{IssueRecord, IssueStatusPatch, NewIssue};
