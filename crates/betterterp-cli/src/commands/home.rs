use betterterp_core::HomeView;

use super::{block_on, open_session, CmdResult};

pub fn run(json: bool) -> CmdResult {
    let mut session = open_session()?;
    block_on(session.refresh())?;
    let view = session.view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

fn print_view(view: &HomeView) {
    println!("Hello, {}", view.username);
    println!();
    println!("Daily Affirmation - {}", view.affirmation);
    println!();
    println!("Your Daily Habits ({})", view.today);
    println!("Streak: {}", view.streak);
    if view.habits.is_empty() {
        println!("You have no habits yet. Add one to get started.");
        return;
    }
    for row in &view.habits {
        let mark = if row.completed { "x" } else { " " };
        println!("[{mark}] {}  {}", row.habit.id, row.habit.title);
        if !row.habit.description.is_empty() {
            println!("      {}", row.habit.description);
        }
    }
}
