use crate::auth::password::hash_password;
use crate::auth::CredentialStore;
use crate::db::{models::Credential, DbPool};
use crate::error::{Error, Result};
use chrono::Utc;

/// Credential store backed by the `users` table
#[derive(Debug, Clone)]
pub struct SqliteCredentialStore {
    pool: DbPool,
}

impl SqliteCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl CredentialStore for SqliteCredentialStore {
    async fn find_user(&self, username: &str) -> Result<Option<Credential>> {
        get_user_by_name(&self.pool, username).await
    }

    async fn insert_user(&self, username: &str, password: &str) -> Result<Credential> {
        let password_hash = hash_password(password)?;
        create_user(&self.pool, username, &password_hash).await
    }
}

/// Create a new user row
pub async fn create_user(
    pool: &DbPool,
    username: &str,
    password_hash: &str,
) -> Result<Credential> {
    let now = Utc::now();

    let result = sqlx::query_as::<_, Credential>(
        r#"
        INSERT INTO users (username, password_hash, created_at)
        VALUES (?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await;

    match result {
        Ok(credential) => Ok(credential),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(Error::Duplicate(username.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Get user by username
pub async fn get_user_by_name(pool: &DbPool, username: &str) -> Result<Option<Credential>> {
    let user = sqlx::query_as::<_, Credential>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_pool, run_migrations};

    async fn test_store() -> SqliteCredentialStore {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteCredentialStore::new(pool)
    }

    async fn user_count(store: &SqliteCredentialStore) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(store.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let store = test_store().await;

        let created = store.insert_user("alice", "x").await.unwrap();
        assert_eq!(created.username, "alice");
        assert_ne!(created.password_hash, "x");

        let found = store.find_user("alice").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(user_count(&store).await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_maps_to_duplicate_error() {
        let store = test_store().await;
        store.insert_user("alice", "x").await.unwrap();

        let result = store.insert_user("alice", "y").await;
        assert!(matches!(result, Err(Error::Duplicate(ref name)) if name == "alice"));
        assert_eq!(user_count(&store).await, 1);
    }
}
