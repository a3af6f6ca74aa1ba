// error.rs — Error types for the goal store and dashboard.

use thiserror::Error;

use crate::model::{CommentId, GoalId, MilestoneId};

/// Errors that can occur during goal store operations.
///
/// Every store operation that returns one of these left the store untouched.
/// The dashboard layer treats the validation and lookup variants as silent
/// no-ops; only the I/O and parse variants ever reach a user.
#[derive(Debug, Error)]
pub enum GoalError {
    /// The requested goal was not found.
    #[error("goal not found: {0}")]
    GoalNotFound(GoalId),

    /// The goal exists but has no milestone with this id.
    #[error("milestone {milestone_id} not found in goal {goal_id}")]
    MilestoneNotFound {
        goal_id: GoalId,
        milestone_id: MilestoneId,
    },

    /// The goal exists but has no comment with this id.
    #[error("comment {comment_id} not found in goal {goal_id}")]
    CommentNotFound {
        goal_id: GoalId,
        comment_id: CommentId,
    },

    /// A goal or milestone title was empty after trimming.
    #[error("title must not be blank")]
    EmptyTitle,

    /// Comment text was empty after trimming.
    #[error("comment text must not be blank")]
    EmptyComment,

    /// A priority string other than high, medium or low.
    #[error("invalid priority '{0}' (expected high, medium or low)")]
    InvalidPriority(String),

    /// A draft field name that the add-goal form does not have.
    #[error("unknown goal field '{0}'")]
    UnknownField(String),

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize goal data or events.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The config file could not be parsed.
    #[error("config error in {path}: {source}")]
    ConfigError {
        path: String,
        source: toml::de::Error,
    },
}

impl GoalError {
    /// True for the variants that represent rejected input or a stale id,
    /// as opposed to an environment failure.
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            GoalError::GoalNotFound(_)
                | GoalError::MilestoneNotFound { .. }
                | GoalError::CommentNotFound { .. }
                | GoalError::EmptyTitle
                | GoalError::EmptyComment
                | GoalError::InvalidPriority(_)
                | GoalError::UnknownField(_)
        )
    }
}
