// shell.rs — `goalsync shell`: an interactive dashboard session.
//
// Each input line is parsed into a ShellCommand and applied to the
// dashboard. Goals, milestones and comments are addressed by their
// 1-based display numbers. Numbers that don't resolve are ignored the same
// way the dashboard ignores stale ids: nothing changes.

use anyhow::{bail, Context};
use goalsync_core::{CommentId, Dashboard, DraftField, GoalId, MilestoneId};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::render;

const HELP: &str = "\
Commands:
  list                     show the board
  expand N                 expand/collapse goal N
  toggle N M               complete/re-open milestone M of goal N
  milestone N TITLE        add a milestone to goal N
  compose N                open/close the comment box of goal N
  write N TEXT             type TEXT into goal N's comment box
  post N                   post goal N's comment box
  comment N TEXT           write and post in one step
  like N C                 like comment C of goal N
  new                      open the new-goal form
  set FIELD VALUE          edit the form (title, description, due, team, owner, priority)
  save | cancel            create the goal / close the form
  dark | sidebar | notifications
  json                     dump goals as JSON
  help | quit";

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    Expand(usize),
    Toggle(usize, usize),
    Milestone(usize, String),
    Compose(usize),
    Write(usize, String),
    Post(usize),
    Comment(usize, String),
    Like(usize, usize),
    New,
    Set(DraftField, String),
    Save,
    Cancel,
    Dark,
    Sidebar,
    Notifications,
    Json,
    Help,
    Quit,
}

pub fn execute(dashboard: &mut Dashboard) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    print!("{}", render::dashboard(dashboard));
    println!(
        "Commenting as {}. Type `help` for commands.",
        dashboard.config().author
    );

    loop {
        match editor.readline("goalsync> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                let command = match parse(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("error: {:#}", e);
                        continue;
                    }
                };
                if command == ShellCommand::Quit {
                    break;
                }
                let output = apply(dashboard, &command)?;
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    let failed = dashboard.failed_deliveries();
    if failed > 0 {
        eprintln!(
            "warning: {} activity log write(s) failed; run with RUST_LOG=goalsync_core=warn for details",
            failed
        );
    }
    Ok(())
}

/// Parse one input line.
pub fn parse(line: &str) -> anyhow::Result<ShellCommand> {
    let (word, rest) = next_word(line);
    let command = match word.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "list" | "ls" => ShellCommand::List,
        "expand" => ShellCommand::Expand(position(rest)?),
        "toggle" => {
            let (goal, rest) = next_word(rest);
            ShellCommand::Toggle(position(goal)?, position(rest)?)
        }
        "milestone" => {
            let (goal, title) = next_word(rest);
            ShellCommand::Milestone(position(goal)?, title.to_string())
        }
        "compose" => ShellCommand::Compose(position(rest)?),
        "write" => {
            let (goal, text) = next_word(rest);
            ShellCommand::Write(position(goal)?, text.to_string())
        }
        "post" => ShellCommand::Post(position(rest)?),
        "comment" => {
            let (goal, text) = next_word(rest);
            ShellCommand::Comment(position(goal)?, text.to_string())
        }
        "like" => {
            let (goal, rest) = next_word(rest);
            ShellCommand::Like(position(goal)?, position(rest)?)
        }
        "new" => ShellCommand::New,
        "set" => {
            let (field, value) = next_word(rest);
            if field.is_empty() {
                bail!("usage: set FIELD VALUE");
            }
            ShellCommand::Set(field.parse()?, value.to_string())
        }
        "save" => ShellCommand::Save,
        "cancel" => ShellCommand::Cancel,
        "dark" => ShellCommand::Dark,
        "sidebar" => ShellCommand::Sidebar,
        "notifications" => ShellCommand::Notifications,
        "json" => ShellCommand::Json,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => bail!("unknown command '{}' (try `help`)", other),
    };
    Ok(command)
}

/// Apply a command and return what to print.
pub fn apply(dashboard: &mut Dashboard, command: &ShellCommand) -> anyhow::Result<String> {
    let output = match command {
        ShellCommand::Empty | ShellCommand::Quit => String::new(),
        ShellCommand::List => render::dashboard(dashboard),
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Json => serde_json::to_string_pretty(dashboard.goals())?,
        ShellCommand::Expand(n) => {
            let changed = goal_at(dashboard, *n)
                .map(|id| dashboard.toggle_expanded(id))
                .unwrap_or(false);
            after(dashboard, changed)
        }
        ShellCommand::Toggle(n, m) => {
            let changed = milestone_at(dashboard, *n, *m)
                .map(|(goal, milestone)| dashboard.toggle_milestone(goal, milestone))
                .unwrap_or(false);
            progress_line(dashboard, *n, changed)
        }
        ShellCommand::Milestone(n, title) => {
            let changed = goal_at(dashboard, *n)
                .map(|id| dashboard.add_milestone(id, title))
                .unwrap_or(false);
            progress_line(dashboard, *n, changed)
        }
        ShellCommand::Compose(n) => {
            let changed = goal_at(dashboard, *n)
                .map(|id| dashboard.toggle_composer(id))
                .unwrap_or(false);
            after(dashboard, changed)
        }
        ShellCommand::Write(n, text) => {
            let changed = goal_at(dashboard, *n)
                .map(|id| dashboard.set_composer_draft(id, text))
                .unwrap_or(false);
            after(dashboard, changed)
        }
        ShellCommand::Post(n) => {
            let changed = goal_at(dashboard, *n)
                .map(|id| dashboard.submit_comment(id))
                .unwrap_or(false);
            after(dashboard, changed)
        }
        ShellCommand::Comment(n, text) => {
            // Blank text must not clobber a draft written with `write`.
            if text.trim().is_empty() {
                return Ok(no_change());
            }
            let changed = goal_at(dashboard, *n)
                .map(|id| dashboard.set_composer_draft(id, text) && dashboard.submit_comment(id))
                .unwrap_or(false);
            after(dashboard, changed)
        }
        ShellCommand::Like(n, c) => {
            let changed = comment_at(dashboard, *n, *c)
                .map(|(goal, comment)| dashboard.like_comment(goal, comment))
                .unwrap_or(false);
            if changed {
                let likes = dashboard.goals()[n - 1].comments[c - 1].likes;
                format!("♥ {}", likes)
            } else {
                no_change()
            }
        }
        ShellCommand::New => {
            dashboard.open_add_goal();
            render::dashboard(dashboard)
        }
        ShellCommand::Set(field, value) => {
            if !dashboard.view().add_goal_open {
                dashboard.open_add_goal();
            }
            let changed = dashboard.update_goal_draft(*field, value);
            after(dashboard, changed)
        }
        ShellCommand::Save => {
            let changed = dashboard.submit_new_goal();
            after(dashboard, changed)
        }
        ShellCommand::Cancel => {
            dashboard.close_add_goal();
            render::dashboard(dashboard)
        }
        ShellCommand::Dark => {
            let dark = dashboard.toggle_dark_mode();
            format!("theme: {}", if dark { "dark" } else { "light" })
        }
        ShellCommand::Sidebar => {
            let open = dashboard.toggle_sidebar();
            format!("sidebar {}", if open { "open" } else { "closed" })
        }
        ShellCommand::Notifications => {
            let open = dashboard.toggle_notifications();
            format!("notifications {}", if open { "open" } else { "closed" })
        }
    };
    Ok(output)
}

fn after(dashboard: &Dashboard, changed: bool) -> String {
    if changed {
        render::dashboard(dashboard)
    } else {
        no_change()
    }
}

fn progress_line(dashboard: &Dashboard, n: usize, changed: bool) -> String {
    if !changed {
        return no_change();
    }
    let goal = &dashboard.goals()[n - 1];
    format!(
        "{}: {} {}% Complete",
        goal.title,
        render::progress_bar(goal.progress),
        goal.progress
    )
}

fn no_change() -> String {
    "(no change)".to_string()
}

fn goal_at(dashboard: &Dashboard, n: usize) -> Option<GoalId> {
    dashboard.goals().get(n.checked_sub(1)?).map(|g| g.id)
}

fn milestone_at(dashboard: &Dashboard, n: usize, m: usize) -> Option<(GoalId, MilestoneId)> {
    let goal = dashboard.goals().get(n.checked_sub(1)?)?;
    let milestone = goal.milestones.get(m.checked_sub(1)?)?;
    Some((goal.id, milestone.id))
}

fn comment_at(dashboard: &Dashboard, n: usize, c: usize) -> Option<(GoalId, CommentId)> {
    let goal = dashboard.goals().get(n.checked_sub(1)?)?;
    let comment = goal.comments.get(c.checked_sub(1)?)?;
    Some((goal.id, comment.id))
}

/// Split off the first whitespace-delimited word; the remainder keeps its
/// inner spacing.
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn position(word: &str) -> anyhow::Result<usize> {
    let word = word.trim();
    if word.is_empty() {
        bail!("missing number");
    }
    word.parse::<usize>()
        .with_context(|| format!("'{}' is not a number", word))
}
