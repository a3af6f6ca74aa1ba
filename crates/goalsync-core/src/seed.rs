// seed.rs — The demo board the dashboard starts with.
//
// Ids are generated fresh on every load. Progress is derived from the
// milestones rather than taken from a literal, so the seeded cards satisfy
// the same invariant as everything created at runtime.

use crate::model::{Comment, Goal, GoalId, Milestone, Priority};

/// Build the three demo goals in display order.
pub fn demo_goals() -> Vec<Goal> {
    vec![
        demo_goal(
            "Launch New Website",
            "Complete redesign and launch of company website",
            "2025-06-15",
            "Alex Chen",
            "Marketing",
            "from-purple-500 to-indigo-600",
            Priority::High,
            vec![
                Comment::new(
                    "Taylor Kim",
                    "Homepage looks great! Can we add more product images?",
                    3,
                    "2 days ago",
                ),
                Comment::new(
                    "Jordan Lee",
                    "SEO optimization complete - all meta tags are in place.",
                    1,
                    "1 day ago",
                ),
            ],
            &[
                ("Wireframes Complete", true),
                ("Design Approval", true),
                ("Content Upload", true),
                ("Testing Phase", false),
                ("Launch", false),
            ],
        ),
        demo_goal(
            "Q2 Sales Targets",
            "Reach $1.2M in new business for Q2",
            "2025-06-30",
            "Sam Rodriguez",
            "Sales",
            "from-emerald-500 to-teal-600",
            Priority::High,
            vec![Comment::new(
                "Morgan Smith",
                "West region is outperforming projections by 12%",
                5,
                "3 days ago",
            )],
            &[
                ("$300K", true),
                ("$600K", true),
                ("$900K", false),
                ("$1.2M", false),
            ],
        ),
        demo_goal(
            "Mobile App Development",
            "Build and launch v1 of customer mobile app",
            "2025-08-30",
            "Jesse Park",
            "Product",
            "from-rose-500 to-pink-600",
            Priority::Medium,
            vec![Comment::new(
                "Robin Cho",
                "API integration is taking longer than expected. We might need another sprint.",
                0,
                "1 day ago",
            )],
            &[
                ("Requirements Gathered", true),
                ("Design Phase", true),
                ("Frontend Development", false),
                ("Backend Integration", false),
                ("Testing", false),
                ("App Store Submission", false),
            ],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn demo_goal(
    title: &str,
    description: &str,
    due_date: &str,
    owner: &str,
    team: &str,
    color: &str,
    priority: Priority,
    comments: Vec<Comment>,
    milestones: &[(&str, bool)],
) -> Goal {
    let mut goal = Goal {
        id: GoalId::new(),
        title: title.to_string(),
        description: description.to_string(),
        progress: 0,
        due_date: due_date.to_string(),
        owner: owner.to_string(),
        team: team.to_string(),
        color: color.to_string(),
        priority,
        comments,
        milestones: milestones
            .iter()
            .map(|(title, completed)| Milestone::new(*title, *completed))
            .collect(),
    };
    goal.recompute_progress();
    goal
}
