//! Error types for the groups client.

use std::fmt;

use reqwest::StatusCode;

/// Errors from group-membership retrieval.
///
/// Kept separate from authentication failures so the request boundary can
/// tell "not logged in" from "logged in but the groups API is down".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupsError {
    /// The groups API could not be reached.
    Transport { reason: String },
    /// The groups API answered with a non-success status.
    Status { status: StatusCode },
    /// The response body was not valid JSON.
    Malformed { reason: String },
}

impl fmt::Display for GroupsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { reason } => {
                write!(f, "groups request failed: {reason}")
            }
            Self::Status { status } => {
                write!(f, "groups API returned {status}")
            }
            Self::Malformed { reason } => {
                write!(f, "malformed groups payload: {reason}")
            }
        }
    }
}

impl std::error::Error for GroupsError {}
