// events.rs — Change events and notification dispatch.
//
// Every successful GoalStore mutation emits exactly one StoreEvent.
// Rejected operations emit nothing. Views use these (together with the
// store's revision counter) for change detection instead of diffing
// snapshots.
//
// The dispatcher is synchronous: sinks run inline, in registration order,
// before the mutating call returns.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::model::{CommentId, GoalId, MilestoneId};

/// Events emitted by the goal store after each mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A goal was appended to the list.
    GoalAdded {
        goal_id: GoalId,
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// A milestone was appended to a goal.
    MilestoneAdded {
        goal_id: GoalId,
        milestone_id: MilestoneId,
        progress: u8,
        timestamp: DateTime<Utc>,
    },

    /// A milestone was completed or re-opened.
    MilestoneToggled {
        goal_id: GoalId,
        milestone_id: MilestoneId,
        completed: bool,
        progress: u8,
        timestamp: DateTime<Utc>,
    },

    /// A comment was posted on a goal.
    CommentAdded {
        goal_id: GoalId,
        comment_id: CommentId,
        user: String,
        timestamp: DateTime<Utc>,
    },

    /// A comment received a like.
    CommentLiked {
        goal_id: GoalId,
        comment_id: CommentId,
        likes: u32,
        timestamp: DateTime<Utc>,
    },
}

/// The kind of a [`StoreEvent`], without its payload.
///
/// Used to subscribe a sink to a subset of events; deserializes from the
/// same snake_case names the JSON `event_type` tag uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    GoalAdded,
    MilestoneAdded,
    MilestoneToggled,
    CommentAdded,
    CommentLiked,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::GoalAdded => "goal_added",
            EventKind::MilestoneAdded => "milestone_added",
            EventKind::MilestoneToggled => "milestone_toggled",
            EventKind::CommentAdded => "comment_added",
            EventKind::CommentLiked => "comment_liked",
        }
    }
}

impl StoreEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StoreEvent::GoalAdded { .. } => EventKind::GoalAdded,
            StoreEvent::MilestoneAdded { .. } => EventKind::MilestoneAdded,
            StoreEvent::MilestoneToggled { .. } => EventKind::MilestoneToggled,
            StoreEvent::CommentAdded { .. } => EventKind::CommentAdded,
            StoreEvent::CommentLiked { .. } => EventKind::CommentLiked,
        }
    }

    /// Get the event type name as a string.
    pub fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// The goal this event concerns.
    pub fn goal_id(&self) -> GoalId {
        match self {
            StoreEvent::GoalAdded { goal_id, .. }
            | StoreEvent::MilestoneAdded { goal_id, .. }
            | StoreEvent::MilestoneToggled { goal_id, .. }
            | StoreEvent::CommentAdded { goal_id, .. }
            | StoreEvent::CommentLiked { goal_id, .. } => *goal_id,
        }
    }

    pub fn goal_added(goal_id: GoalId, title: &str) -> Self {
        StoreEvent::GoalAdded {
            goal_id,
            title: title.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn milestone_added(goal_id: GoalId, milestone_id: MilestoneId, progress: u8) -> Self {
        StoreEvent::MilestoneAdded {
            goal_id,
            milestone_id,
            progress,
            timestamp: Utc::now(),
        }
    }

    pub fn milestone_toggled(
        goal_id: GoalId,
        milestone_id: MilestoneId,
        completed: bool,
        progress: u8,
    ) -> Self {
        StoreEvent::MilestoneToggled {
            goal_id,
            milestone_id,
            completed,
            progress,
            timestamp: Utc::now(),
        }
    }

    pub fn comment_added(goal_id: GoalId, comment_id: CommentId, user: &str) -> Self {
        StoreEvent::CommentAdded {
            goal_id,
            comment_id,
            user: user.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn comment_liked(goal_id: GoalId, comment_id: CommentId, likes: u32) -> Self {
        StoreEvent::CommentLiked {
            goal_id,
            comment_id,
            likes,
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving store events.
///
/// Implementations decide what to do with each event: append it to a log,
/// trace it, refresh a view, etc.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop the store.
    fn send(&self, event: &StoreEvent) -> Result<(), GoalError>;
}

/// Appends events as JSONL to an activity log file.
///
/// The file is write-only from GoalSync's point of view; it is never read
/// back into the store.
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &StoreEvent) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Emits every event as a `tracing` debug record.
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn send(&self, event: &StoreEvent) -> Result<(), GoalError> {
        tracing::debug!(
            event_type = event.event_type(),
            goal_id = %event.goal_id(),
            "store event"
        );
        Ok(())
    }
}

/// A sink plus the event kinds it wants. `None` means every kind.
struct Subscription {
    sink: Box<dyn NotificationSink>,
    kinds: Option<Vec<EventKind>>,
}

impl Subscription {
    fn wants(&self, kind: EventKind) -> bool {
        self.kinds.as_ref().map_or(true, |kinds| kinds.contains(&kind))
    }
}

/// Dispatches events to multiple sinks.
///
/// Errors from individual sinks are logged (via tracing) and counted but
/// don't prevent other sinks from receiving the event.
pub struct EventDispatcher {
    subscriptions: Vec<Subscription>,
    failed_deliveries: u64,
}

impl EventDispatcher {
    /// Create a new dispatcher with no sinks.
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            failed_deliveries: 0,
        }
    }

    /// Add a sink that receives every event.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.subscriptions.push(Subscription { sink, kinds: None });
    }

    /// Add a sink that only receives events of the given kinds. An empty
    /// list subscribes to everything.
    pub fn add_filtered_sink(&mut self, sink: Box<dyn NotificationSink>, kinds: &[EventKind]) {
        let kinds = if kinds.is_empty() {
            None
        } else {
            Some(kinds.to_vec())
        };
        self.subscriptions.push(Subscription { sink, kinds });
    }

    /// Number of sink deliveries that returned an error so far.
    pub fn failed_deliveries(&self) -> u64 {
        self.failed_deliveries
    }

    /// Dispatch an event to every sink subscribed to its kind.
    pub fn dispatch(&mut self, event: &StoreEvent) {
        let kind = event.kind();
        for subscription in self.subscriptions.iter().filter(|s| s.wants(kind)) {
            if let Err(e) = subscription.sink.send(event) {
                self.failed_deliveries += 1;
                tracing::warn!(event_type = kind.as_str(), "notification sink error: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn event_json_is_tagged() {
        let event = StoreEvent::goal_added(GoalId::new(), "Launch New Website");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event_type\":\"goal_added\""));

        let restored: StoreEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.event_type(), "goal_added");
        assert_eq!(restored.goal_id(), event.goal_id());
    }

    #[test]
    fn log_sink_appends_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("activity.jsonl");
        let sink = LogSink::new(&path);

        let goal_id = GoalId::new();
        sink.send(&StoreEvent::goal_added(goal_id, "Goal 1")).unwrap();
        sink.send(&StoreEvent::comment_liked(goal_id, CommentId::new(), 4))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("comment_liked"));
    }

    #[test]
    fn dispatcher_sends_to_all_sinks() {
        let dir = tempdir().unwrap();
        let path1 = dir.path().join("sink1.jsonl");
        let path2 = dir.path().join("sink2.jsonl");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(LogSink::new(&path1)));
        dispatcher.add_sink(Box::new(TracingSink));
        dispatcher.add_sink(Box::new(LogSink::new(&path2)));

        let event =
            StoreEvent::milestone_toggled(GoalId::new(), MilestoneId::new(), true, 80);
        dispatcher.dispatch(&event);

        assert!(fs::read_to_string(&path1)
            .unwrap()
            .contains("milestone_toggled"));
        assert!(fs::read_to_string(&path2)
            .unwrap()
            .contains("milestone_toggled"));
    }

    #[test]
    fn failing_sink_does_not_block_others() {
        let dir = tempdir().unwrap();
        // A directory path cannot be opened for append.
        let broken = dir.path().to_path_buf();
        let good = dir.path().join("good.jsonl");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(LogSink::new(&broken)));
        dispatcher.add_sink(Box::new(LogSink::new(&good)));

        dispatcher.dispatch(&StoreEvent::goal_added(GoalId::new(), "x"));
        dispatcher.dispatch(&StoreEvent::goal_added(GoalId::new(), "y"));
        assert_eq!(fs::read_to_string(&good).unwrap().lines().count(), 2);
        assert_eq!(dispatcher.failed_deliveries(), 2);
    }

    #[test]
    fn filtered_sink_only_sees_its_kinds() {
        let dir = tempdir().unwrap();
        let comments = dir.path().join("comments.jsonl");
        let everything = dir.path().join("all.jsonl");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_filtered_sink(
            Box::new(LogSink::new(&comments)),
            &[EventKind::CommentAdded, EventKind::CommentLiked],
        );
        dispatcher.add_filtered_sink(Box::new(LogSink::new(&everything)), &[]);

        let goal_id = GoalId::new();
        dispatcher.dispatch(&StoreEvent::goal_added(goal_id, "Audit"));
        dispatcher.dispatch(&StoreEvent::comment_added(goal_id, CommentId::new(), "You"));
        dispatcher.dispatch(&StoreEvent::milestone_toggled(
            goal_id,
            MilestoneId::new(),
            true,
            100,
        ));

        let filtered = fs::read_to_string(&comments).unwrap();
        assert_eq!(filtered.lines().count(), 1);
        assert!(filtered.contains("comment_added"));
        assert_eq!(fs::read_to_string(&everything).unwrap().lines().count(), 3);
        assert_eq!(dispatcher.failed_deliveries(), 0);
    }

    #[test]
    fn event_kind_names_match_json_tag() {
        let event = StoreEvent::comment_liked(GoalId::new(), CommentId::new(), 2);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], event.kind().as_str());

        let kind: EventKind = serde_json::from_str("\"milestone_added\"").unwrap();
        assert_eq!(kind, EventKind::MilestoneAdded);
    }
}
