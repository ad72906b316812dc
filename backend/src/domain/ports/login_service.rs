//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! resolve credentials to an owner id without knowing the identity provider
//! behind it.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

const FIXTURE_PASSWORD: &str = "password";

/// Known development accounts and their fixed owner ids.
const FIXTURE_ACCOUNTS: [(&str, &str); 2] = [
    ("admin", "123e4567-e89b-12d3-a456-426614174000"),
    ("clerk", "9b2f5c1e-7d4a-4e8b-a1c3-0f6e2d8b7a95"),
];

/// In-memory authenticator for development and tests.
///
/// `admin` and `clerk` authenticate with the password `password`; each maps
/// to its own fixed owner id so their counters never overlap.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = FIXTURE_ACCOUNTS
            .iter()
            .find(|(username, _)| *username == credentials.username());
        match account {
            Some((_, id)) if credentials.password() == FIXTURE_PASSWORD => UserId::new(id)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}"))),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}
