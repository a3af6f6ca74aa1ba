// Integration test: a full session against the demo board.
//
// Walks the same path a user takes through the dashboard (expand a card,
// tick milestones, discuss, like, add a goal) and checks the goal data,
// the revision counter and the activity log after each step.

use std::collections::HashSet;
use std::fs;

use goalsync_core::{
    Dashboard, DraftField, GoalDraft, GoalStore, GoalSyncConfig, LogSink, StoreEvent,
};
use tempfile::tempdir;

#[test]
fn demo_session_end_to_end() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("activity.jsonl");
    let config = GoalSyncConfig {
        author: "Alex Chen".to_string(),
        activity_log: Some(log.clone()),
        ..GoalSyncConfig::default()
    };
    let mut dash = Dashboard::new(config);
    assert_eq!(dash.goals().len(), 3);

    // Expand the website card and finish "Testing Phase".
    let website = dash.goals()[0].clone();
    assert_eq!(website.progress, 60);
    assert!(dash.toggle_expanded(website.id));
    assert!(dash.view().is_expanded(website.id));
    assert!(dash.toggle_milestone(website.id, website.milestones[3].id));
    assert_eq!(dash.goals()[0].progress, 80);
    assert!(dash.toggle_milestone(website.id, website.milestones[4].id));
    assert_eq!(dash.goals()[0].progress, 100);

    // Discuss and like.
    dash.set_composer_draft(website.id, "Launched!");
    assert!(dash.submit_comment(website.id));
    let taylor = website.comments[0].id;
    assert!(dash.like_comment(website.id, taylor));
    let comments = &dash.goals()[0].comments;
    assert_eq!(comments.len(), 3);
    assert_eq!(comments[0].likes, 4);
    assert_eq!(comments[2].user, "Alex Chen");
    assert_eq!(comments[2].time, "Just now");

    // Add a goal through the modal.
    dash.open_add_goal();
    dash.update_goal_draft(DraftField::Title, "Customer Onboarding Revamp");
    dash.update_goal_draft(DraftField::Priority, "high");
    assert!(dash.submit_new_goal());
    let added = dash.goals().last().unwrap().clone();
    assert_eq!(added.progress, 0);
    assert!(dash.add_milestone(added.id, "Interview 10 customers"));
    assert_eq!(dash.goals()[3].milestones.len(), 1);

    // Ignored operations in between change nothing.
    let revision = dash.revision();
    assert!(!dash.add_comment(added.id, "   "));
    assert!(!dash.submit_new_goal());
    assert_eq!(dash.revision(), revision);
    assert_eq!(revision, 6);

    // Every successful mutation reached the activity log, in order.
    let content = fs::read_to_string(&log).unwrap();
    let kinds: Vec<String> = content
        .lines()
        .map(|line| {
            let event: StoreEvent = serde_json::from_str(line).unwrap();
            event.event_type().to_string()
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "milestone_toggled",
            "milestone_toggled",
            "comment_added",
            "comment_liked",
            "goal_added",
            "milestone_added",
        ]
    );
}

#[test]
fn like_count_is_monotonic() {
    let mut store = GoalStore::with_goals(goalsync_core::seed::demo_goals());
    let sales = store.goals()[1].clone();
    let morgan = &sales.comments[0];
    for n in 1..=25u32 {
        let likes = store.like_comment(sales.id, morgan.id).unwrap();
        assert_eq!(likes, morgan.likes + n);
    }
}

#[test]
fn goal_ids_stay_unique_across_many_creations() {
    let mut store = GoalStore::new().with_rng_seed(11);
    for i in 0..10_000 {
        store
            .add_goal(&GoalDraft::titled(format!("goal {}", i)))
            .unwrap();
    }
    let ids: HashSet<_> = store.goals().iter().map(|g| g.id).collect();
    assert_eq!(ids.len(), 10_000);
}

#[test]
fn extra_sink_sees_events_from_seeded_store() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("events.jsonl");
    let mut store = GoalStore::with_goals(goalsync_core::seed::demo_goals());
    store.add_sink(Box::new(LogSink::new(&log)));

    let mobile = store.goals()[2].clone();
    store
        .toggle_milestone(mobile.id, mobile.milestones[2].id)
        .unwrap();
    assert_eq!(store.goals()[2].progress, 50);

    let line = fs::read_to_string(&log).unwrap();
    let event: StoreEvent = serde_json::from_str(line.trim()).unwrap();
    match event {
        StoreEvent::MilestoneToggled {
            completed,
            progress,
            ..
        } => {
            assert!(completed);
            assert_eq!(progress, 50);
        }
        other => panic!("unexpected event {:?}", other),
    }
}
