// view.rs — Presentation flags that sit next to the goal data.
//
// Expansion and comment-composer state are per-goal, independent toggles:
// opening one goal's composer leaves every other goal's composer alone.

use std::collections::{HashMap, HashSet};

use crate::model::{GoalDraft, GoalId};

/// UI state for the dashboard. Holds no goal data.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub dark_mode: bool,
    pub sidebar_open: bool,
    pub notifications_open: bool,
    pub add_goal_open: bool,

    /// Contents of the add-goal modal.
    pub goal_draft: GoalDraft,

    expanded: HashSet<GoalId>,
    composers: HashSet<GoalId>,
    comment_drafts: HashMap<GoalId, String>,
}

impl ViewState {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            ..Self::default()
        }
    }

    pub fn is_expanded(&self, goal_id: GoalId) -> bool {
        self.expanded.contains(&goal_id)
    }

    /// Flip a goal card between expanded and collapsed. Returns the new state.
    pub fn toggle_expanded(&mut self, goal_id: GoalId) -> bool {
        toggle(&mut self.expanded, goal_id)
    }

    pub fn is_composer_open(&self, goal_id: GoalId) -> bool {
        self.composers.contains(&goal_id)
    }

    /// Open or close a goal's comment composer. Returns the new state.
    /// The typed draft survives closing.
    pub fn toggle_composer(&mut self, goal_id: GoalId) -> bool {
        toggle(&mut self.composers, goal_id)
    }

    pub fn open_composer(&mut self, goal_id: GoalId) {
        self.composers.insert(goal_id);
    }

    pub fn close_composer(&mut self, goal_id: GoalId) {
        self.composers.remove(&goal_id);
    }

    pub fn comment_draft(&self, goal_id: GoalId) -> &str {
        self.comment_drafts
            .get(&goal_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_comment_draft(&mut self, goal_id: GoalId, text: impl Into<String>) {
        self.comment_drafts.insert(goal_id, text.into());
    }

    pub fn clear_comment_draft(&mut self, goal_id: GoalId) {
        self.comment_drafts.remove(&goal_id);
    }
}

fn toggle(set: &mut HashSet<GoalId>, goal_id: GoalId) -> bool {
    if set.remove(&goal_id) {
        false
    } else {
        set.insert(goal_id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_is_per_goal() {
        let mut view = ViewState::default();
        let a = GoalId::new();
        let b = GoalId::new();

        assert!(view.toggle_expanded(a));
        assert!(view.toggle_expanded(b));
        assert!(view.is_expanded(a));
        assert!(view.is_expanded(b));

        assert!(!view.toggle_expanded(a));
        assert!(!view.is_expanded(a));
        assert!(view.is_expanded(b));
    }

    #[test]
    fn composers_do_not_close_each_other() {
        let mut view = ViewState::default();
        let a = GoalId::new();
        let b = GoalId::new();
        view.open_composer(a);
        view.open_composer(b);
        assert!(view.is_composer_open(a));
        assert!(view.is_composer_open(b));
        view.close_composer(a);
        assert!(!view.is_composer_open(a));
        assert!(view.is_composer_open(b));
    }

    #[test]
    fn comment_draft_survives_closing_composer() {
        let mut view = ViewState::default();
        let a = GoalId::new();
        view.toggle_composer(a);
        view.set_comment_draft(a, "half a thought");
        view.toggle_composer(a);
        assert!(!view.is_composer_open(a));
        assert_eq!(view.comment_draft(a), "half a thought");

        view.clear_comment_draft(a);
        assert_eq!(view.comment_draft(a), "");
    }

    #[test]
    fn new_applies_initial_theme() {
        assert!(ViewState::new(true).dark_mode);
        assert!(!ViewState::new(false).sidebar_open);
    }
}
