//! Unified error system for the Civic Eye backend
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorBody`]: JSON error body (`{"error": ..., "code": ...}`)
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Report errors
//! - 2xxx: Upload errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ErrorBody};
//!
//! let err = AppError::new(ErrorCode::NoFileProvided);
//! assert_eq!(err.message, "No file part");
//!
//! let err = AppError::validation("Invalid latitude").with_detail("field", "lat");
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.error, "Invalid latitude");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
