//! Unified error codes for the Civic Eye backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Report errors
//! - 2xxx: Upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can branch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Report ====================
    /// Report not found
    ReportNotFound = 1001,
    /// Report identifier is malformed
    InvalidReportId = 1002,
    /// Status field missing or empty
    StatusRequired = 1003,
    /// Latitude/longitude not numeric
    InvalidCoordinates = 1004,

    // ==================== 2xxx: Upload ====================
    /// Multipart request has no file part
    NoFileProvided = 2001,
    /// File part has an empty filename
    NoFilename = 2002,
    /// File part has no bytes
    EmptyFile = 2003,
    /// Upload exceeds configured body limit
    FileTooLarge = 2004,
    /// Writing the upload to disk failed
    FileStorageFailed = 2005,
    /// Requested upload does not exist
    FileNotFound = 2006,
    /// Requested upload name is not a plain filename
    InvalidFilename = 2007,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Report
            ErrorCode::ReportNotFound => "Report not found",
            ErrorCode::InvalidReportId => "Invalid report id",
            ErrorCode::StatusRequired => "Status required",
            ErrorCode::InvalidCoordinates => "Invalid coordinates",

            // Upload
            ErrorCode::NoFileProvided => "No file part",
            ErrorCode::NoFilename => "No selected file",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::FileStorageFailed => "File storage failed",
            ErrorCode::FileNotFound => "File not found",
            ErrorCode::InvalidFilename => "Invalid filename",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Report
            1001 => Ok(ErrorCode::ReportNotFound),
            1002 => Ok(ErrorCode::InvalidReportId),
            1003 => Ok(ErrorCode::StatusRequired),
            1004 => Ok(ErrorCode::InvalidCoordinates),

            // Upload
            2001 => Ok(ErrorCode::NoFileProvided),
            2002 => Ok(ErrorCode::NoFilename),
            2003 => Ok(ErrorCode::EmptyFile),
            2004 => Ok(ErrorCode::FileTooLarge),
            2005 => Ok(ErrorCode::FileStorageFailed),
            2006 => Ok(ErrorCode::FileNotFound),
            2007 => Ok(ErrorCode::InvalidFilename),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
