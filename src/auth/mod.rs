//! User accounts: the credential store capability and the signup/login flow
//! built on top of it.

pub mod memory;
pub mod password;

pub use crate::db::models::Credential;
pub use memory::MemoryCredentialStore;

use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::utils::validation::{validate_password, validate_username};
use tracing::{debug, info};

/// Lookup and creation of user accounts.
///
/// Implementations must enforce username uniqueness and report a taken name
/// as [`Error::Duplicate`].
#[allow(async_fn_in_trait)]
pub trait CredentialStore {
    async fn find_user(&self, username: &str) -> Result<Option<Credential>>;

    async fn insert_user(&self, username: &str, password: &str) -> Result<Credential>;

    /// Look up a user and check the password against the stored hash
    async fn find_user_with_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Credential>> {
        let Some(credential) = self.find_user(username).await? else {
            return Ok(None);
        };

        if password::verify_password(password, &credential.password_hash)? {
            Ok(Some(credential))
        } else {
            Ok(None)
        }
    }
}

/// Signup and login against an injected credential store
pub struct AuthService<S> {
    store: S,
    config: AuthConfig,
}

impl<S: CredentialStore> AuthService<S> {
    pub fn new(store: S, config: AuthConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an account after validating the username and password
    pub async fn signup(&self, username: &str, password: &str) -> Result<Credential> {
        validate_username(username)?;
        validate_password(password, self.config.min_password_length)?;

        let credential = self.store.insert_user(username, password).await?;
        info!("Created account '{}'", credential.username);
        Ok(credential)
    }

    /// Check a username and password
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential> {
        match self.store.find_user_with_password(username, password).await? {
            Some(credential) => {
                info!("User '{}' logged in", credential.username);
                Ok(credential)
            }
            None => {
                debug!("Rejected login attempt");
                Err(Error::InvalidCredentials)
            }
        }
    }
}
