use crate::auth::password::hash_password;
use crate::auth::CredentialStore;
use crate::db::models::Credential;
use crate::error::{Error, Result};
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Credential store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Users>,
}

#[derive(Debug, Default)]
struct Users {
    next_id: i64,
    by_name: HashMap<String, Credential>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_name.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn find_user(&self, username: &str) -> Result<Option<Credential>> {
        Ok(self.inner.read().await.by_name.get(username).cloned())
    }

    async fn insert_user(&self, username: &str, password: &str) -> Result<Credential> {
        let mut users = self.inner.write().await;
        if users.by_name.contains_key(username) {
            return Err(Error::Duplicate(username.to_string()));
        }

        users.next_id += 1;
        let credential = Credential {
            id: users.next_id,
            username: username.to_string(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        users
            .by_name
            .insert(username.to_string(), credential.clone());

        Ok(credential)
    }
}
