//! Habit management commands for CLI.

use betterterp_core::{HomeSession, KvStore};
use clap::Subcommand;

use super::{block_on, open_session, user_facing, CmdResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List today's habits
    List {
        #[arg(long)]
        json: bool,
    },
    /// Create a new habit
    Add {
        /// Habit title
        title: String,
        /// Habit description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Check a habit off for today
    Done {
        /// Habit ID
        id: String,
    },
    /// Uncheck a habit for today
    Undo {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction) -> CmdResult {
    let mut session = open_session()?;
    match action {
        HabitAction::List { json } => {
            block_on(session.refresh())?;
            let view = session.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view.habits)?);
            } else if view.habits.is_empty() {
                println!("You have no habits yet. Add one to get started.");
            } else {
                for row in &view.habits {
                    let mark = if row.completed { "x" } else { " " };
                    println!("[{mark}] {}  {}", row.habit.id, row.habit.title);
                }
            }
        }
        HabitAction::Add { title, description } => {
            let habit = block_on(session.add_habit(&title, &description))?
                .map_err(user_facing)?;
            println!("Habit created: {} ({})", habit.title, habit.id);
        }
        HabitAction::Done { id } => mark(&mut session, &id, true)?,
        HabitAction::Undo { id } => mark(&mut session, &id, false)?,
    }
    Ok(())
}

fn mark(session: &mut HomeSession<KvStore>, id: &str, value: bool) -> CmdResult {
    block_on(session.refresh())?;
    let outcome = session.mark_habit(id, value).map_err(user_facing)?;
    let verb = if value { "Checked" } else { "Unchecked" };
    println!("{verb} {id}");
    if outcome.streak_incremented {
        println!("Streak extended to {}!", outcome.streak);
    } else {
        println!("Streak: {}", outcome.streak);
    }
    Ok(())
}
