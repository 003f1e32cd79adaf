//! User service implementation
//!
//! This service handles user account management, role assignment, the
//! visible-pages allow-list, and deactivation.

use tracing::{debug, info, warn};

use crate::database::repositories::UserRepository;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User, UserRole};
use crate::services::auth::AuthService;
use crate::services::navigation;
use crate::utils::errors::{Result, ThreadlineError};
use crate::utils::helpers;

/// User service for managing user operations
#[derive(Debug, Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    fn validate_role(role: &str) -> Result<UserRole> {
        UserRole::parse(role)
            .ok_or_else(|| ThreadlineError::InvalidInput(format!("Unknown role: {}", role)))
    }

    fn validate_visible_pages(pages: &[String]) -> Result<()> {
        let known = navigation::known_page_keys();
        for page in pages {
            if !known.contains(&page.as_str()) {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Unknown page key: {}",
                    page
                )));
            }
        }
        Ok(())
    }

    /// Create a new user account
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        helpers::require_field(&request.display_name, "display_name")?;
        if !helpers::is_valid_email(&request.email) {
            return Err(ThreadlineError::InvalidInput(format!(
                "Invalid email: {}",
                request.email
            )));
        }
        if request.password.len() < 8 {
            return Err(ThreadlineError::InvalidInput(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        let role = Self::validate_role(&request.role)?;

        let visible_pages = request.visible_pages.unwrap_or_default();
        Self::validate_visible_pages(&visible_pages)?;

        if self.user_repository.find_by_email(&request.email).await?.is_some() {
            warn!(email = %request.email, "Attempt to create duplicate user");
            return Err(ThreadlineError::InvalidInput(format!(
                "Email already in use: {}",
                request.email
            )));
        }

        let salt = AuthService::generate_salt();
        let hash = AuthService::hash_password(&request.password, &salt);

        let user = self
            .user_repository
            .create(
                &request.email,
                &request.display_name,
                &hash,
                &salt,
                role.as_str(),
                visible_pages,
            )
            .await?;

        info!(user_id = user.id, role = %user.role, "User account created");
        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        debug!(user_id = user_id, "Getting user by ID");
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(ThreadlineError::UserNotFound { user_id })
    }

    /// Update a user account
    pub async fn update_user(&self, user_id: i64, request: UpdateUserRequest) -> Result<User> {
        self.get_user(user_id).await?;

        if let Some(ref role) = request.role {
            Self::validate_role(role)?;
        }
        if let Some(ref pages) = request.visible_pages {
            Self::validate_visible_pages(pages)?;
        }
        if let Some(ref name) = request.display_name {
            helpers::require_field(name, "display_name")?;
        }

        let user = self.user_repository.update(user_id, request).await?;
        info!(user_id = user_id, "User account updated");
        Ok(user)
    }

    /// Replace a user's visible pages allow-list
    pub async fn set_visible_pages(&self, user_id: i64, pages: Vec<String>) -> Result<User> {
        self.get_user(user_id).await?;
        Self::validate_visible_pages(&pages)?;

        let user = self.user_repository.set_visible_pages(user_id, pages).await?;
        info!(user_id = user_id, "Visible pages updated");
        Ok(user)
    }

    /// Deactivate a user, ending their ability to authenticate
    pub async fn deactivate_user(&self, user_id: i64) -> Result<User> {
        let request = UpdateUserRequest {
            is_active: Some(false),
            ..Default::default()
        };
        let user = self.user_repository.update(user_id, request).await?;
        info!(user_id = user_id, "User deactivated");
        Ok(user)
    }

    /// List users with pagination
    pub async fn list_users(&self, page: i64, page_size: i64) -> Result<Vec<User>> {
        let offset = helpers::calculate_offset(page, page_size);
        self.user_repository.list(page_size, offset).await
    }

    /// Delete a user account
    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        self.get_user(user_id).await?;
        self.user_repository.delete(user_id).await?;
        info!(user_id = user_id, "User deleted");
        Ok(())
    }
}
