//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine rejections and worker coordination failures so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{GameError, Side, SubmitError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine refused the command; nothing changed.
    #[error("rejected: {0}")]
    Rejected(#[from] SubmitError),

    #[error("{side} action provider failed: {message}")]
    Provider { side: Side, message: String },

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to encode event")]
    Encode(#[source] serde_json::Error),
}

impl RuntimeError {
    /// Stable code for the rejection reason, if this is an engine rejection.
    pub fn rejection_code(&self) -> Option<&'static str> {
        match self {
            RuntimeError::Rejected(err) => Some(err.error_code()),
            _ => None,
        }
    }
}
