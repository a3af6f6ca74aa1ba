// dashboard.rs — Dashboard: the single state owner handed to the view layer.
//
// The view never touches goal data directly; it calls these methods and
// re-reads `goals()` / `view()`. Invalid input and stale ids are ignored
// silently: every mutating method returns `false` and leaves all state
// unchanged, logging the reason at debug level.

use crate::config::GoalSyncConfig;
use crate::error::GoalError;
use crate::model::{CommentId, DraftField, Goal, GoalDraft, GoalId, MilestoneId};
use crate::store::GoalStore;
use crate::view::ViewState;

/// Goal data plus the UI state around it.
pub struct Dashboard {
    store: GoalStore,
    view: ViewState,
    config: GoalSyncConfig,
}

impl Dashboard {
    /// Build a dashboard from config (seed data, theme, sinks).
    pub fn new(config: GoalSyncConfig) -> Self {
        let store = GoalStore::from_config(&config);
        Self::with_store(store, config)
    }

    /// Wrap an existing store.
    pub fn with_store(store: GoalStore, config: GoalSyncConfig) -> Self {
        Self {
            store,
            view: ViewState::new(config.dark_mode),
            config,
        }
    }

    pub fn goals(&self) -> &[Goal] {
        self.store.goals()
    }

    /// Event deliveries that failed (see [`GoalStore::failed_deliveries`]).
    pub fn failed_deliveries(&self) -> u64 {
        self.store.failed_deliveries()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &GoalSyncConfig {
        &self.config
    }

    /// Store revision; changes exactly when goal data changes.
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn toggle_milestone(&mut self, goal_id: GoalId, milestone_id: MilestoneId) -> bool {
        applied(self.store.toggle_milestone(goal_id, milestone_id))
    }

    pub fn add_milestone(&mut self, goal_id: GoalId, title: &str) -> bool {
        applied(self.store.add_milestone(goal_id, title))
    }

    /// Post `text` as the configured author.
    pub fn add_comment(&mut self, goal_id: GoalId, text: &str) -> bool {
        applied(self.store.add_comment(goal_id, text, &self.config.author))
    }

    pub fn like_comment(&mut self, goal_id: GoalId, comment_id: CommentId) -> bool {
        applied(self.store.like_comment(goal_id, comment_id))
    }

    /// Expand or collapse a goal card. Unknown goals are ignored.
    pub fn toggle_expanded(&mut self, goal_id: GoalId) -> bool {
        if !self.has_goal(goal_id) {
            return false;
        }
        self.view.toggle_expanded(goal_id);
        true
    }

    /// Open or close a goal's comment composer. Unknown goals are ignored.
    pub fn toggle_composer(&mut self, goal_id: GoalId) -> bool {
        if !self.has_goal(goal_id) {
            return false;
        }
        self.view.toggle_composer(goal_id);
        true
    }

    /// Replace the composer text for a goal, opening its composer.
    pub fn set_composer_draft(&mut self, goal_id: GoalId, text: &str) -> bool {
        if !self.has_goal(goal_id) {
            return false;
        }
        self.view.open_composer(goal_id);
        self.view.set_comment_draft(goal_id, text);
        true
    }

    /// Post the goal's composer draft. On success the draft is cleared and
    /// that goal's composer closes; a blank draft leaves both as they are.
    pub fn submit_comment(&mut self, goal_id: GoalId) -> bool {
        let text = self.view.comment_draft(goal_id).to_string();
        if !applied(self.store.add_comment(goal_id, &text, &self.config.author)) {
            return false;
        }
        self.view.clear_comment_draft(goal_id);
        self.view.close_composer(goal_id);
        true
    }

    pub fn open_add_goal(&mut self) {
        self.view.add_goal_open = true;
    }

    /// Hide the add-goal modal. The draft is kept for next time.
    pub fn close_add_goal(&mut self) {
        self.view.add_goal_open = false;
    }

    /// Edit one field of the add-goal draft.
    pub fn update_goal_draft(&mut self, field: DraftField, value: &str) -> bool {
        applied(self.view.goal_draft.set(field, value))
    }

    /// Create a goal from the modal draft. On success the draft resets and
    /// the modal closes; a blank title leaves both untouched.
    pub fn submit_new_goal(&mut self) -> bool {
        if !applied(self.store.add_goal(&self.view.goal_draft)) {
            return false;
        }
        self.view.goal_draft = GoalDraft::default();
        self.view.add_goal_open = false;
        true
    }

    /// Returns the new theme (`true` = dark).
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.view.dark_mode = !self.view.dark_mode;
        self.view.dark_mode
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.view.sidebar_open = !self.view.sidebar_open;
        self.view.sidebar_open
    }

    pub fn toggle_notifications(&mut self) -> bool {
        self.view.notifications_open = !self.view.notifications_open;
        self.view.notifications_open
    }

    fn has_goal(&self, goal_id: GoalId) -> bool {
        self.store.goal(goal_id).is_some()
    }
}

/// Collapse a store result into "did anything change".
fn applied<T>(result: Result<T, GoalError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) if e.is_ignorable() => {
            tracing::debug!("ignored: {}", e);
            false
        }
        Err(e) => {
            tracing::warn!("dashboard operation failed: {}", e);
            false
        }
    }
}
