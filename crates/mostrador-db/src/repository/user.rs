//! # User Repository
//!
//! Account storage for login (`usuarios` table).
//!
//! Password hashing happens in the HTTP layer (argon2id); this repository
//! only ever sees PHC hash strings, never plaintext.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use mostrador_core::User;

/// Repository for user account database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Creates an account.
    ///
    /// ## Arguments
    /// * `username` - Already validated (3-50 chars)
    /// * `password_hash` - argon2id PHC string
    ///
    /// ## Returns
    /// * `Ok(User)` - Account created
    /// * `Err(DbError::UniqueViolation)` - Username already taken
    pub async fn insert(&self, username: &str, password_hash: &str) -> DbResult<User> {
        debug!(username = %username, "Creating account");

        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO usuarios (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let err = DbError::from(e);
            if err.is_unique_violation() {
                DbError::duplicate("username", username)
            } else {
                err
            }
        })?;

        let id = result.last_insert_rowid();

        info!(id = %id, username = %username, "Account created");

        Ok(User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
        })
    }

    /// Looks up an account by username.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Found
    /// * `Ok(None)` - No such account (caller decides how much to reveal)
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM usuarios WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let user = repo.insert("marta", "$argon2id$fake-hash").await.unwrap();
        assert!(user.id > 0);

        let found = repo.find_by_username("marta").await.unwrap().unwrap();
        assert_eq!(found.username, "marta");
        assert_eq!(found.password_hash, "$argon2id$fake-hash");

        assert!(repo.find_by_username("nadie").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_signalled() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        repo.insert("marta", "hash-a").await.unwrap();
        let err = repo.insert("marta", "hash-b").await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
