//! # goalsync-core
//!
//! In-memory state for the GoalSync team goals dashboard.
//!
//! A [`Goal`] owns its milestones and comments. Its progress is derived
//! from milestone completion. All goal data lives in one [`GoalStore`];
//! the [`Dashboard`] wraps the store with per-goal UI flags and turns
//! invalid input into silent no-ops.
//!
//! ## Key components
//!
//! - [`GoalStore`] — ordered goal list and its mutation operations
//! - [`Dashboard`] — state owner for the view layer (store + [`ViewState`])
//! - [`StoreEvent`] — change notification emitted once per mutation
//! - [`EventDispatcher`] / [`NotificationSink`] — event fan-out (tracing, JSONL)
//! - [`GoalSyncConfig`] — TOML configuration
//! - [`seed::demo_goals`] — the demo board loaded at startup

pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod model;
pub mod seed;
pub mod store;
pub mod view;

pub use config::GoalSyncConfig;
pub use dashboard::Dashboard;
pub use error::GoalError;
pub use events::{EventDispatcher, EventKind, LogSink, NotificationSink, StoreEvent, TracingSink};
pub use model::{
    Comment, CommentId, DraftField, Goal, GoalDraft, GoalId, Milestone, MilestoneId, Priority,
};
pub use store::GoalStore;
pub use view::ViewState;
