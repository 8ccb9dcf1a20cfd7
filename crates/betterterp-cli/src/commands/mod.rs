pub mod affirmation;
pub mod auth;
pub mod config;
pub mod habit;
pub mod home;
pub mod streak;

use std::error::Error;
use std::future::Future;

use betterterp_core::{
    ApiClient, Config, CoreError, DateKeyProvider, HomeSession, Identity, KvStore,
};

pub type CmdResult = Result<(), Box<dyn Error>>;

/// Run one future to completion on a fresh runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output, Box<dyn Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(future))
}

/// Service failures show the server's detail or the connection message
/// rather than the full error chain.
pub fn user_facing(err: CoreError) -> Box<dyn Error> {
    match err {
        CoreError::Api(api) => api.user_message().into(),
        other => other.into(),
    }
}

pub fn client(config: &Config) -> Result<ApiClient, Box<dyn Error>> {
    Ok(ApiClient::from_config(&config.api)?)
}

pub fn signed_in(store: &KvStore) -> Result<Identity, Box<dyn Error>> {
    Identity::require(store).map_err(user_facing)
}

/// Open the home session for the signed-in user, without fetching.
pub fn open_session() -> Result<HomeSession<KvStore>, Box<dyn Error>> {
    let config = Config::load_or_default();
    let store = KvStore::open()?;
    let me = signed_in(&store)?;
    Ok(HomeSession::open(
        store,
        DateKeyProvider::system(),
        client(&config)?,
        &me.username,
    ))
}
