use chrono::{Local, NaiveDateTime};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::AuthError;

/// Credential check consulted by [`login`].
pub trait CredentialCheck {
    fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError>;
}

/// Accepts exactly one configured username/password pair.
///
/// The password is kept only as a bcrypt hash.
#[derive(Debug, Clone)]
pub struct FixedCredentials {
    username: String,
    password_hash: String,
}

impl FixedCredentials {
    pub fn new(username: &str, password: &str, cost: u32) -> Result<Self, AuthError> {
        Ok(Self {
            username: username.to_string(),
            password_hash: bcrypt::hash(password, cost)?,
        })
    }
}

impl CredentialCheck for FixedCredentials {
    fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if username != self.username {
            return Ok(false);
        }
        Ok(bcrypt::verify(password, &self.password_hash)?)
    }
}

/// Who is logged in and since when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub logged_in_at: NaiveDateTime,
}

/// Checks credentials after the simulated loading delay.
///
/// Concurrent calls are not serialized.
pub async fn login<C: CredentialCheck + ?Sized>(
    check: &C,
    username: &str,
    password: &str,
    delay: Duration,
) -> Result<Principal, AuthError> {
    tokio::time::sleep(delay).await;

    if !check.verify(username, password)? {
        warn!("Login failed for {}", username);
        return Err(AuthError::InvalidCredentials);
    }

    info!("User {} logged in", username);
    Ok(Principal {
        username: username.to_string(),
        logged_in_at: Local::now().naive_local(),
    })
}
