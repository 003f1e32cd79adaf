//! User repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::{UpdateUserRequest, User};
use crate::utils::errors::ThreadlineError;

const USER_COLUMNS: &str = "id, email, display_name, password_hash, password_salt, role, visible_pages, is_active, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with a pre-computed password digest
    pub async fn create(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
        password_salt: &str,
        role: &str,
        visible_pages: Vec<String>,
    ) -> Result<User, ThreadlineError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, display_name, password_hash, password_salt, role, visible_pages, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, email, display_name, password_hash, password_salt, role, visible_pages, is_active, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(display_name)
        .bind(password_hash)
        .bind(password_salt)
        .bind(role)
        .bind(visible_pages)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, ThreadlineError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ThreadlineError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE lower(email) = lower($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, ThreadlineError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET display_name = COALESCE($2, display_name),
                role = COALESCE($3, role),
                visible_pages = COALESCE($4, visible_pages),
                is_active = COALESCE($5, is_active),
                updated_at = $6
            WHERE id = $1
            RETURNING id, email, display_name, password_hash, password_salt, role, visible_pages, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.display_name)
        .bind(request.role)
        .bind(request.visible_pages)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Replace a user's visible pages allow-list
    pub async fn set_visible_pages(
        &self,
        id: i64,
        visible_pages: Vec<String>,
    ) -> Result<User, ThreadlineError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET visible_pages = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, email, display_name, password_hash, password_salt, role, visible_pages, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(visible_pages)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Delete user
    pub async fn delete(&self, id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List all users with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, ThreadlineError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, ThreadlineError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
