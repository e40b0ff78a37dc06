//! Remote command source
//!
//! This module handles:
//! - The RPC contract with the backend (fetch / acknowledge / complete /
//!   status submission)
//! - The HTTP client implementation speaking JSON with static-key auth
//! - Normalized, transport-agnostic errors

mod http;
mod types;

#[cfg(test)]
pub mod mock;

pub use http::HttpBackend;
pub use types::{CommandOutcome, CommandType, StatusReport, WateringCommand};

use async_trait::async_trait;
use thiserror::Error;

/// Normalized error for backend operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The backend could not be reached, timed out, or answered non-2xx.
    #[error("backend unreachable: {message}")]
    Unavailable { message: String },

    /// The backend answered but reported the operation as failed.
    #[error("{operation} rejected by backend: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },

    /// The backend answered with a body this agent cannot decode.
    #[error("malformed {operation} response: {message}")]
    Malformed {
        operation: &'static str,
        message: String,
    },
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable {
            message: err.to_string(),
        }
    }
}

/// The backend interface for a single device.
///
/// Implementations carry the device identity; callers never pass it. All
/// operations are async and return normalized errors so the poll loop can
/// log and move on.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch commands queued for this device.
    async fn fetch_pending_commands(&self) -> Result<Vec<WateringCommand>, BackendError>;

    /// Acknowledge receipt of a command before executing it.
    async fn acknowledge_command(&self, command_id: &str) -> Result<(), BackendError>;

    /// Report the terminal outcome of a command.
    async fn complete_command(
        &self,
        command_id: &str,
        outcome: &CommandOutcome,
    ) -> Result<(), BackendError>;

    /// Submit one telemetry record.
    async fn submit_status(&self, report: &StatusReport) -> Result<(), BackendError>;
}
