//! User Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::UserRecord;
use shared::models::{User, UserCreate, UserRole};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "pos_user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let records: Vec<UserRecord> = self
            .base
            .db()
            .query("SELECT * FROM pos_user ORDER BY username")
            .await?
            .take(0)?;
        Ok(records.into_iter().map(User::from).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = parse_record_id(TABLE, id)?;
        let record: Option<UserRecord> = self.base.db().select(thing).await?;
        Ok(record.map(User::from))
    }

    /// Full record including the password hash, for login
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM pos_user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let users: Vec<UserRecord> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn count(&self) -> RepoResult<usize> {
        #[derive(serde::Deserialize)]
        struct Count {
            count: usize,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM pos_user GROUP ALL")
            .await?;
        let count: Option<Count> = result.take(0)?;
        Ok(count.map(|c| c.count).unwrap_or(0))
    }

    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        data.validate().map_err(RepoError::Validation)?;
        let username = data.username.trim().to_string();

        if self.find_by_username(&username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let hash_pass = UserRecord::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let display_name = data
            .display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| username.clone());

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE pos_user SET
                    username = $username,
                    display_name = $display_name,
                    hash_pass = $hash_pass,
                    role = $role
                RETURN AFTER"#,
            )
            .bind(("username", username))
            .bind(("display_name", display_name))
            .bind(("hash_pass", hash_pass))
            .bind(("role", data.role.as_str().to_string()))
            .await?;

        let created: Option<UserRecord> = result.take(0)?;
        created
            .map(User::from)
            .ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Hard delete
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(TABLE, id)?;
        let deleted: Option<UserRecord> = self.base.db().delete(thing).await?;
        deleted
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Create the initial admin when the table is empty
    ///
    /// Returns `true` if an account was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> RepoResult<bool> {
        if self.count().await? > 0 {
            return Ok(false);
        }

        let admin = self
            .create(UserCreate {
                username: username.to_string(),
                password: password.to_string(),
                display_name: Some("Administrator".to_string()),
                role: UserRole::Admin,
            })
            .await?;
        tracing::info!(user_id = %admin.id, username = %admin.username, "Initial admin account created");
        Ok(true)
    }
}
