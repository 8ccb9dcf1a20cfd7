use clap::Subcommand;
use betterterp_core::{AffirmationRotator, Config, DateKeyProvider};
use tracing::warn;

use super::{block_on, client, user_facing, CmdResult};

#[derive(Subcommand)]
pub enum AffirmationAction {
    /// Today's affirmation
    Today,
    /// Every affirmation the service knows
    List,
}

pub fn run(action: AffirmationAction) -> CmdResult {
    let config = Config::load_or_default();
    let client = client(&config)?;
    let fetched = block_on(client.fetch_affirmations())?;

    match action {
        AffirmationAction::Today => {
            let affirmations = fetched.unwrap_or_else(|e| {
                warn!(error = %e, "failed to load affirmations");
                Vec::new()
            });
            let rotator = AffirmationRotator::new(affirmations);
            println!("{}", rotator.message_for_today(&DateKeyProvider::system()));
        }
        AffirmationAction::List => {
            for line in fetched.map_err(|e| user_facing(e.into()))? {
                println!("{line}");
            }
        }
    }
    Ok(())
}
