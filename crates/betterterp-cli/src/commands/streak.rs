use betterterp_core::{DateKeyProvider, HabitStreakEngine, KvStore};

use super::{signed_in, CmdResult};

pub fn run(json: bool) -> CmdResult {
    let store = KvStore::open()?;
    let me = signed_in(&store)?;
    let engine = HabitStreakEngine::load(store, me.username, DateKeyProvider::system().today());
    let streak = engine.streak();

    if json {
        println!("{}", serde_json::to_string_pretty(&streak)?);
        return Ok(());
    }
    println!("Streak: {}", streak.count);
    match streak.last_increment {
        Some(day) => println!("Last extended: {day}"),
        None => println!("Last extended: never"),
    }
    println!(
        "Checked today: {}",
        engine.completion().completed_count()
    );
    Ok(())
}
