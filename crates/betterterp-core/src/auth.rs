//! Sign-in state and the login/register calls.
//!
//! The signed-in handle lives in the store under `username` (and `email`
//! when one was given). Everything per-user is keyed off that handle.

use serde::Serialize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::{Result, StorageError, ValidationError};
use crate::storage::{keys, PersistenceGateway};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub username: String,
    pub email: Option<String>,
}

impl Identity {
    /// The stored identity, if someone is signed in.
    pub fn load<G: PersistenceGateway>(gateway: &G) -> Option<Self> {
        let username = gateway.get(keys::USERNAME).filter(|u| !u.is_empty())?;
        let email = gateway.get(keys::EMAIL).filter(|e| !e.is_empty());
        Some(Self { username, email })
    }

    pub fn store<G: PersistenceGateway>(&self, gateway: &mut G) -> Result<(), StorageError> {
        gateway.set(keys::USERNAME, &self.username)?;
        match &self.email {
            Some(email) => gateway.set(keys::EMAIL, email),
            None => gateway.remove(keys::EMAIL),
        }
    }

    /// Forget the signed-in user. Their streak and checklists stay stored.
    pub fn clear<G: PersistenceGateway>(gateway: &mut G) -> Result<(), StorageError> {
        gateway.remove(keys::USERNAME)?;
        gateway.remove(keys::EMAIL)
    }

    /// The stored identity, or [`ValidationError::NotSignedIn`].
    pub fn require<G: PersistenceGateway>(gateway: &G) -> Result<Self> {
        Self::load(gateway).ok_or_else(|| ValidationError::NotSignedIn.into())
    }
}

fn require_field(name: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(name).into());
    }
    Ok(())
}

/// Check credentials with the service and remember the user locally.
pub async fn login<G: PersistenceGateway>(
    client: &ApiClient,
    gateway: &mut G,
    username: &str,
    password: &str,
    email: Option<&str>,
) -> Result<Identity> {
    require_field("username", username)?;
    require_field("password", password)?;

    let resp = client.login(username.trim(), password).await?;
    let identity = Identity {
        username: resp
            .username
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| username.trim().to_string()),
        email: email.map(str::trim).filter(|e| !e.is_empty()).map(str::to_string),
    };
    identity.store(gateway)?;
    info!(user = %identity.username, "signed in");
    Ok(identity)
}

/// Create an account. Does not sign in.
pub async fn register(client: &ApiClient, username: &str, email: &str, password: &str) -> Result<()> {
    require_field("username", username)?;
    require_field("email", email)?;
    require_field("password", password)?;

    client
        .register(username.trim(), email.trim(), password)
        .await?;
    info!(user = %username.trim(), "registered");
    Ok(())
}
