//! Crate error type.
//!
//! Only the adapter surfaces (planner, store) are fallible. The fairness
//! engine itself never errors: an empty candidate set yields `None` and
//! every other degenerate input is normalized internally.

use thiserror::Error;

/// Errors from planning and storage operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("group not found: {0}")]
    GroupNotFound(String),

    #[error("unknown invite code: {0}")]
    UnknownInviteCode(String),

    #[error("member '{member_id}' is not in group '{group_id}'")]
    NotAMember {
        group_id: String,
        member_id: String,
    },

    #[error("group '{0}' has no driver candidates")]
    NoCandidates(String),

    #[error("invalid ride: {0}")]
    InvalidRide(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
