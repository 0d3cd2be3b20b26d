//! 服务层
//!
//! - [`IssueService`] - 问题上报的受理、分类、查询与状态变更
//! - [`HttpService`] - HTTP 服务器

pub mod http_server;
pub mod issue_lifecycle;

pub use http_server::{HttpService, build_app};
pub use issue_lifecycle::{CreateIssueRequest, IssueService, UploadedFile};
