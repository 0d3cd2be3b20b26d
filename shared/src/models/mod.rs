//! Wire models shared between the server and its clients

pub mod issue;

pub use issue::{
    GeoLocation, IssueCreated, IssueReport, MessageResponse, Prediction, STATUS_PENDING,
    StatusUpdate,
};
