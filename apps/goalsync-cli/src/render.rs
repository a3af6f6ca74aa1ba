// render.rs — Plain-text rendering of the dashboard.
//
// Goals, milestones and comments are numbered from 1 in display order;
// the shell addresses them by those numbers.

use goalsync_core::{Dashboard, Goal, GoalDraft, ViewState};

const BAR_WIDTH: usize = 20;

/// Render the whole board: header, one card per goal, and the add-goal
/// modal when it is open.
pub fn dashboard(dashboard: &Dashboard) -> String {
    let view = dashboard.view();
    let mut lines = Vec::new();

    lines.push(format!(
        "GoalSync · Team Goals Dashboard{:>24}",
        if view.dark_mode { "[dark]" } else { "[light]" }
    ));
    if view.sidebar_open || view.notifications_open {
        lines.push(format!(
            "  sidebar: {}  notifications: {}",
            open_closed(view.sidebar_open),
            open_closed(view.notifications_open)
        ));
    }
    lines.push("-".repeat(55));

    if dashboard.goals().is_empty() {
        lines.push("No goals yet. Use `new` to add one.".to_string());
    }
    for (i, goal) in dashboard.goals().iter().enumerate() {
        lines.extend(goal_card(goal, i + 1, view));
        lines.push(String::new());
    }

    if view.add_goal_open {
        lines.extend(goal_modal(&view.goal_draft));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn goal_card(goal: &Goal, number: usize, view: &ViewState) -> Vec<String> {
    let mut lines = vec![
        format!("[{}] {}  ({})", number, goal.title, goal.priority),
        format!("    {}", truncate(&goal.description, 60)),
        format!(
            "    {} {:>3}% Complete   due {}",
            progress_bar(goal.progress),
            goal.progress,
            goal.due_date
        ),
        format!("    Owner: {}   Team: {}", goal.owner, goal.team),
    ];

    if !view.is_expanded(goal.id) {
        lines.push(format!(
            "    {} milestone(s), {} comment(s)",
            goal.milestones.len(),
            goal.comments.len()
        ));
        return lines;
    }

    lines.push("    Milestones:".to_string());
    if goal.milestones.is_empty() {
        lines.push("      (none)".to_string());
    }
    for (i, m) in goal.milestones.iter().enumerate() {
        let mark = if m.completed { "x" } else { " " };
        lines.push(format!("      {}. [{}] {}", i + 1, mark, m.title));
    }

    lines.push("    Comments:".to_string());
    if goal.comments.is_empty() {
        lines.push("      (none)".to_string());
    }
    for (i, c) in goal.comments.iter().enumerate() {
        lines.push(format!(
            "      {}. {} ({})  ♥ {}",
            i + 1,
            c.user,
            c.time,
            c.likes
        ));
        lines.push(format!("         {}", c.text));
    }

    if view.is_composer_open(goal.id) {
        lines.push(format!("    > {}", view.comment_draft(goal.id)));
    }
    lines
}

fn goal_modal(draft: &GoalDraft) -> Vec<String> {
    let priority = draft
        .priority
        .map(|p| p.to_string())
        .unwrap_or_else(|| "(medium)".to_string());
    vec![
        "== New Goal ==".to_string(),
        format!("  title:       {}", draft.title),
        format!("  description: {}", draft.description),
        format!("  due:         {}", draft.due_date),
        format!("  team:        {}", draft.team),
        format!("  owner:       {}", draft.owner),
        format!("  priority:    {}", priority),
        "  (`set FIELD VALUE`, then `save` or `cancel`)".to_string(),
    ]
}

pub fn progress_bar(progress: u8) -> String {
    let filled = (usize::from(progress.min(100)) * BAR_WIDTH + 50) / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn open_closed(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalsync_core::{GoalStore, GoalSyncConfig};

    fn demo() -> Dashboard {
        let store = GoalStore::with_goals(goalsync_core::seed::demo_goals());
        Dashboard::with_store(store, GoalSyncConfig::default())
    }

    #[test]
    fn progress_bar_scales_to_width() {
        assert_eq!(progress_bar(0), "-".repeat(20));
        assert_eq!(progress_bar(100), "#".repeat(20));
        assert_eq!(progress_bar(60), format!("{}{}", "#".repeat(12), "-".repeat(8)));
    }

    #[test]
    fn collapsed_cards_show_summary_only() {
        let out = dashboard(&demo());
        assert!(out.contains("[1] Launch New Website  (high)"));
        assert!(out.contains(" 60% Complete"));
        assert!(out.contains("5 milestone(s), 2 comment(s)"));
        assert!(!out.contains("Wireframes Complete"));
        assert!(out.contains("[light]"));
    }

    #[test]
    fn expanded_card_lists_milestones_and_comments() {
        let mut dash = demo();
        let id = dash.goals()[0].id;
        dash.toggle_expanded(id);
        dash.set_composer_draft(id, "draft text");

        let out = dashboard(&dash);
        assert!(out.contains("1. [x] Wireframes Complete"));
        assert!(out.contains("4. [ ] Testing Phase"));
        assert!(out.contains("1. Taylor Kim (2 days ago)  ♥ 3"));
        assert!(out.contains("> draft text"));
        // Other cards stay collapsed.
        assert!(!out.contains("$300K"));
    }

    #[test]
    fn modal_rendered_when_open() {
        let mut dash = demo();
        dash.open_add_goal();
        let out = dashboard(&dash);
        assert!(out.contains("== New Goal =="));
        assert!(out.contains("priority:    (medium)"));
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }
}
