// show.rs — `goalsync show`: render the board once.

use goalsync_core::{Dashboard, GoalId};

use crate::render;

pub fn execute(dashboard: &mut Dashboard, json: bool, expand_all: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(dashboard.goals())?);
        return Ok(());
    }

    if expand_all {
        let ids: Vec<GoalId> = dashboard.goals().iter().map(|g| g.id).collect();
        for id in ids {
            dashboard.toggle_expanded(id);
        }
    }
    print!("{}", render::dashboard(dashboard));
    Ok(())
}
