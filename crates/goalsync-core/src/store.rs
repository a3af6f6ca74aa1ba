// store.rs — GoalStore: the in-memory owner of every goal.
//
// Goals are kept in insertion order, which is also display order (newest
// last). All mutation goes through the methods below. Each one either
// succeeds, bumps the revision counter and dispatches one StoreEvent, or
// fails with a GoalError and leaves the store exactly as it was.

use std::collections::HashSet;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::{GoalSyncConfig, DEFAULT_PALETTE};
use crate::error::GoalError;
use crate::events::{EventDispatcher, LogSink, NotificationSink, StoreEvent, TracingSink};
use crate::model::{
    Comment, CommentId, Goal, GoalDraft, GoalId, Milestone, MilestoneId, Priority,
};
use crate::seed;

const FALLBACK_DESCRIPTION: &str = "No description provided";
const FALLBACK_DUE_DATE: &str = "Not set";
const FALLBACK_OWNER: &str = "Unassigned";
const FALLBACK_TEAM: &str = "No team";

/// In-memory store for goals, their milestones and comments.
pub struct GoalStore {
    goals: Vec<Goal>,
    palette: Vec<String>,
    just_now_label: String,
    rng: StdRng,
    dispatcher: EventDispatcher,
    revision: u64,
}

impl GoalStore {
    /// Create an empty store with the default palette.
    pub fn new() -> Self {
        Self {
            goals: Vec::new(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            just_now_label: "Just now".to_string(),
            rng: StdRng::from_entropy(),
            dispatcher: EventDispatcher::new(),
            revision: 0,
        }
    }

    /// Create a store pre-populated with `goals`.
    ///
    /// Repeated goal ids (and repeated milestone or comment ids within one
    /// goal) are replaced with fresh ones, later occurrences losing. Progress
    /// is re-derived from milestones, or clamped to 100 for goals without any.
    pub fn with_goals(goals: Vec<Goal>) -> Self {
        let mut store = Self::new();
        let mut seen = HashSet::new();
        for mut goal in goals {
            if !seen.insert(goal.id) {
                let old = goal.id;
                goal.id = loop {
                    let id = GoalId::new();
                    if !seen.contains(&id) {
                        break id;
                    }
                };
                seen.insert(goal.id);
                tracing::debug!(old = %old, new = %goal.id, "re-assigned duplicate goal id");
            }
            dedupe_children(&mut goal);
            goal.progress = goal.progress.min(100);
            goal.recompute_progress();
            store.goals.push(goal);
        }
        store
    }

    /// Build the store described by `config`: demo goals (if enabled),
    /// palette, comment label, and an activity log sink (if configured).
    pub fn from_config(config: &GoalSyncConfig) -> Self {
        let mut store = if config.seed_demo {
            Self::with_goals(seed::demo_goals())
        } else {
            Self::new()
        };
        if !config.palette.is_empty() {
            store.palette = config.palette.clone();
        }
        store.just_now_label = config.just_now_label.clone();
        store.add_sink(Box::new(TracingSink));
        if let Some(ref path) = config.activity_log {
            store
                .dispatcher
                .add_filtered_sink(Box::new(LogSink::new(path)), &config.activity_log_events);
        }
        store
    }

    /// Replace the color generator with a deterministic one.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Register a sink that receives every subsequent store event.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.dispatcher.add_sink(sink);
    }

    /// All goals, in display order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// An owned copy of the current goal list.
    pub fn snapshot(&self) -> Vec<Goal> {
        self.goals.clone()
    }

    pub fn goal(&self, goal_id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Number of successful mutations since the store was built.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sink deliveries that failed so far (e.g. an unwritable activity log).
    pub fn failed_deliveries(&self) -> u64 {
        self.dispatcher.failed_deliveries()
    }

    /// Flip a milestone's completion and recompute its goal's progress.
    /// Returns the goal's new progress.
    pub fn toggle_milestone(
        &mut self,
        goal_id: GoalId,
        milestone_id: MilestoneId,
    ) -> Result<u8, GoalError> {
        let goal = self.goal_mut(goal_id)?;
        let milestone = goal
            .milestone_mut(milestone_id)
            .ok_or(GoalError::MilestoneNotFound {
                goal_id,
                milestone_id,
            })?;
        milestone.completed = !milestone.completed;
        let completed = milestone.completed;
        goal.recompute_progress();
        let progress = goal.progress;

        self.commit(StoreEvent::milestone_toggled(
            goal_id,
            milestone_id,
            completed,
            progress,
        ));
        Ok(progress)
    }

    /// Append a comment by `author`. Blank text is rejected.
    pub fn add_comment(
        &mut self,
        goal_id: GoalId,
        text: &str,
        author: &str,
    ) -> Result<CommentId, GoalError> {
        if text.trim().is_empty() {
            return Err(GoalError::EmptyComment);
        }
        let time = self.just_now_label.clone();
        let goal = self.goal_mut(goal_id)?;

        let mut comment = Comment::new(author, text, 0, time);
        comment.posted_at = Some(Utc::now());
        let comment_id = comment.id;
        goal.comments.push(comment);

        self.commit(StoreEvent::comment_added(goal_id, comment_id, author));
        Ok(comment_id)
    }

    /// Add one like to a comment. Returns the new like count.
    pub fn like_comment(
        &mut self,
        goal_id: GoalId,
        comment_id: CommentId,
    ) -> Result<u32, GoalError> {
        let goal = self.goal_mut(goal_id)?;
        let comment = goal
            .comment_mut(comment_id)
            .ok_or(GoalError::CommentNotFound {
                goal_id,
                comment_id,
            })?;
        comment.likes = comment.likes.saturating_add(1);
        let likes = comment.likes;

        self.commit(StoreEvent::comment_liked(goal_id, comment_id, likes));
        Ok(likes)
    }

    /// Create a goal from a draft and append it. Blank titles are rejected;
    /// blank optional fields get fallbacks.
    pub fn add_goal(&mut self, draft: &GoalDraft) -> Result<GoalId, GoalError> {
        if draft.title.trim().is_empty() {
            return Err(GoalError::EmptyTitle);
        }

        let color = self
            .palette
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| DEFAULT_PALETTE[0].to_string());

        let goal = Goal {
            id: self.fresh_goal_id(),
            title: draft.title.clone(),
            description: or_fallback(&draft.description, FALLBACK_DESCRIPTION),
            progress: 0,
            due_date: or_fallback(&draft.due_date, FALLBACK_DUE_DATE),
            owner: or_fallback(&draft.owner, FALLBACK_OWNER),
            team: or_fallback(&draft.team, FALLBACK_TEAM),
            color,
            priority: draft.priority.unwrap_or(Priority::Medium),
            comments: Vec::new(),
            milestones: Vec::new(),
        };
        let goal_id = goal.id;
        tracing::info!(goal_id = %goal_id, title = %goal.title, "goal added");
        self.goals.push(goal);

        self.commit(StoreEvent::goal_added(goal_id, &draft.title));
        Ok(goal_id)
    }

    /// Append an open milestone to a goal and recompute its progress.
    pub fn add_milestone(
        &mut self,
        goal_id: GoalId,
        title: &str,
    ) -> Result<MilestoneId, GoalError> {
        if title.trim().is_empty() {
            return Err(GoalError::EmptyTitle);
        }
        let goal = self.goal_mut(goal_id)?;
        let milestone = Milestone::new(title, false);
        let milestone_id = milestone.id;
        goal.milestones.push(milestone);
        goal.recompute_progress();
        let progress = goal.progress;

        self.commit(StoreEvent::milestone_added(goal_id, milestone_id, progress));
        Ok(milestone_id)
    }

    fn goal_mut(&mut self, goal_id: GoalId) -> Result<&mut Goal, GoalError> {
        self.goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or(GoalError::GoalNotFound(goal_id))
    }

    // v4 collisions are not a practical concern, but goal ids are the one
    // store-wide uniqueness guarantee, so check anyway.
    fn fresh_goal_id(&self) -> GoalId {
        loop {
            let id = GoalId::new();
            if self.goal(id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self, event: StoreEvent) {
        self.revision += 1;
        self.dispatcher.dispatch(&event);
    }
}

impl Default for GoalStore {
    fn default() -> Self {
        Self::new()
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Give repeated milestone and comment ids inside one goal fresh values.
fn dedupe_children(goal: &mut Goal) {
    let mut milestone_ids = HashSet::new();
    for milestone in &mut goal.milestones {
        while !milestone_ids.insert(milestone.id) {
            milestone.id = MilestoneId::new();
        }
    }
    let mut comment_ids = HashSet::new();
    for comment in &mut goal.comments {
        while !comment_ids.insert(comment.id) {
            comment.id = CommentId::new();
        }
    }
}
