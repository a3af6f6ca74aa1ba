// model.rs — Goal, Milestone, Comment and the add-goal draft.
//
// A Goal owns its milestones and comments outright; nothing is shared
// between goals. Progress is derived from milestone completion as soon as
// a goal has at least one milestone:
//
//   progress = round(100 * completed / total)   (halves round up)
//
// A goal without milestones keeps whatever progress it was given (0 for
// goals created at runtime).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GoalError;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a goal, unique across the store.
    GoalId
);
id_type!(
    /// Identifier of a milestone, unique within its goal.
    MilestoneId
);
id_type!(
    /// Identifier of a comment, unique within its goal.
    CommentId
);

/// Goal priority as shown on the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(GoalError::InvalidPriority(other.to_string())),
        }
    }
}

/// A named sub-task whose completion drives the goal's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub title: String,
    pub completed: bool,
}

impl Milestone {
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: MilestoneId::new(),
            title: title.into(),
            completed,
        }
    }
}

/// A likeable note in a goal's discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,

    /// Display name of the author.
    pub user: String,

    pub text: String,

    /// Only ever incremented.
    pub likes: u32,

    /// Relative time label ("2 days ago", "Just now").
    pub time: String,

    /// When the comment was posted. Seed comments carry only a label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(
        user: impl Into<String>,
        text: impl Into<String>,
        likes: u32,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: CommentId::new(),
            user: user.into(),
            text: text.into(),
            likes,
            time: time.into(),
            posted_at: None,
        }
    }
}

/// A tracked team objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub description: String,

    /// Percentage complete, always in 0..=100.
    pub progress: u8,

    /// Free-form due date label (e.g. "2025-06-15" or "Not set").
    pub due_date: String,
    pub owner: String,
    pub team: String,

    /// Presentational card color (a gradient class name).
    pub color: String,
    pub priority: Priority,
    pub comments: Vec<Comment>,
    pub milestones: Vec<Milestone>,
}

impl Goal {
    /// Number of completed milestones.
    pub fn completed_milestones(&self) -> usize {
        self.milestones.iter().filter(|m| m.completed).count()
    }

    /// Re-derive `progress` from milestones. Goals without milestones keep
    /// their current value.
    pub fn recompute_progress(&mut self) {
        if let Some(progress) =
            milestone_progress(self.completed_milestones(), self.milestones.len())
        {
            self.progress = progress;
        }
    }

    pub fn milestone(&self, id: MilestoneId) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    pub fn milestone_mut(&mut self, id: MilestoneId) -> Option<&mut Milestone> {
        self.milestones.iter_mut().find(|m| m.id == id)
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    pub fn comment_mut(&mut self, id: CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == id)
    }
}

/// `round(100 * completed / total)` with halves rounding up, or `None` when
/// there are no milestones.
pub fn milestone_progress(completed: usize, total: usize) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let completed = completed.min(total);
    // Integer form of floor(100c/t + 1/2); the result is at most 100.
    Some(((200 * completed + total) / (2 * total)) as u8)
}

/// Contents of the add-goal modal.
///
/// Blank optional fields are replaced with fallbacks when the goal is
/// created; only the title is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub owner: String,
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl GoalDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Overwrite one field. A blank priority clears it back to the default.
    pub fn set(&mut self, field: DraftField, value: &str) -> Result<(), GoalError> {
        match field {
            DraftField::Title => self.title = value.to_string(),
            DraftField::Description => self.description = value.to_string(),
            DraftField::DueDate => self.due_date = value.to_string(),
            DraftField::Owner => self.owner = value.to_string(),
            DraftField::Team => self.team = value.to_string(),
            DraftField::Priority => {
                self.priority = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
        }
        Ok(())
    }
}

/// The editable fields of a [`GoalDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    DueDate,
    Owner,
    Team,
    Priority,
}

impl FromStr for DraftField {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(DraftField::Title),
            "description" | "desc" => Ok(DraftField::Description),
            "due" | "due_date" | "duedate" => Ok(DraftField::DueDate),
            "owner" => Ok(DraftField::Owner),
            "team" => Ok(DraftField::Team),
            "priority" => Ok(DraftField::Priority),
            other => Err(GoalError::UnknownField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn goal_with(milestones: &[bool]) -> Goal {
        Goal {
            id: GoalId::new(),
            title: "Goal".to_string(),
            description: String::new(),
            progress: 17,
            due_date: "Not set".to_string(),
            owner: "Unassigned".to_string(),
            team: "No team".to_string(),
            color: "from-blue-500 to-cyan-600".to_string(),
            priority: Priority::Medium,
            comments: Vec::new(),
            milestones: milestones
                .iter()
                .enumerate()
                .map(|(i, done)| Milestone::new(format!("m{}", i), *done))
                .collect(),
        }
    }

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(milestone_progress(3, 5), Some(60));
        assert_eq!(milestone_progress(1, 3), Some(33));
        assert_eq!(milestone_progress(2, 3), Some(67));
        assert_eq!(milestone_progress(1, 8), Some(13)); // 12.5
        assert_eq!(milestone_progress(0, 4), Some(0));
        assert_eq!(milestone_progress(4, 4), Some(100));
        assert_eq!(milestone_progress(0, 0), None);
    }

    #[test]
    fn progress_always_within_bounds() {
        for total in 1..=50 {
            for completed in 0..=total {
                let p = milestone_progress(completed, total).unwrap();
                assert!(p <= 100);
            }
        }
    }

    #[test]
    fn recompute_without_milestones_keeps_value() {
        let mut goal = goal_with(&[]);
        goal.recompute_progress();
        assert_eq!(goal.progress, 17);
    }

    #[test]
    fn recompute_uses_completion_ratio() {
        let mut goal = goal_with(&[true, false, false, false]);
        goal.recompute_progress();
        assert_eq!(goal.progress, 25);
    }

    #[test]
    fn generated_ids_are_distinct() {
        let ids: HashSet<GoalId> = (0..10_000).map(|_| GoalId::new()).collect();
        assert_eq!(ids.len(), 10_000);
        let ids: HashSet<MilestoneId> = (0..10_000).map(|_| MilestoneId::new()).collect();
        assert_eq!(ids.len(), 10_000);
        let ids: HashSet<CommentId> = (0..10_000).map(|_| CommentId::new()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn priority_parse_and_display() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(Priority::Low.to_string(), "low");
        assert_eq!(Priority::default(), Priority::Medium);
        assert!(matches!(
            "urgent".parse::<Priority>(),
            Err(GoalError::InvalidPriority(_))
        ));
    }

    #[test]
    fn draft_set_fields() {
        let mut draft = GoalDraft::default();
        draft.set(DraftField::Title, "Ship v2").unwrap();
        draft.set("due".parse().unwrap(), "2025-09-01").unwrap();
        draft.set(DraftField::Priority, "low").unwrap();
        assert_eq!(draft.title, "Ship v2");
        assert_eq!(draft.due_date, "2025-09-01");
        assert_eq!(draft.priority, Some(Priority::Low));

        draft.set(DraftField::Priority, "  ").unwrap();
        assert_eq!(draft.priority, None);
        assert!(draft.set(DraftField::Priority, "soon").is_err());
    }

    #[test]
    fn comment_json_omits_missing_timestamp() {
        let comment = Comment::new("Taylor Kim", "Looks good", 3, "2 days ago");
        let json = serde_json::to_string(&comment).unwrap();
        assert!(!json.contains("posted_at"));
        let restored: Comment = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, comment);
    }
}
