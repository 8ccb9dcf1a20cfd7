use clap::Subcommand;
use betterterp_core::{auth, Config, Identity, KvStore};

use super::{block_on, client, signed_in, user_facing, CmdResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account on the service
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in and remember the user locally
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Stored alongside the username
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the signed-in user (their streak stays stored)
    Logout,
    /// Show the signed-in user
    Whoami,
}

pub fn run(action: AuthAction) -> CmdResult {
    let config = Config::load_or_default();
    match action {
        AuthAction::Register {
            username,
            email,
            password,
        } => {
            let client = client(&config)?;
            block_on(auth::register(&client, &username, &email, &password))?
                .map_err(user_facing)?;
            println!("Registration successful!");
        }
        AuthAction::Login {
            username,
            password,
            email,
        } => {
            let client = client(&config)?;
            let mut store = KvStore::open()?;
            let me = block_on(auth::login(
                &client,
                &mut store,
                &username,
                &password,
                email.as_deref(),
            ))?
            .map_err(user_facing)?;
            println!("Logged in as {}", me.username);
        }
        AuthAction::Logout => {
            let mut store = KvStore::open()?;
            Identity::clear(&mut store)?;
            println!("Logged out");
        }
        AuthAction::Whoami => {
            let store = KvStore::open()?;
            let me = signed_in(&store)?;
            match me.email {
                Some(email) => println!("{} <{}>", me.username, email),
                None => println!("{}", me.username),
            }
        }
    }
    Ok(())
}
