//! Authentication service implementation
//!
//! This service handles login, session token issue and verification,
//! permission checking for API operations, and role-based access control.

use std::collections::HashSet;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::database::repositories::UserRepository;
use crate::models::user::{User, UserRole};
use crate::services::redis::RedisService;
use crate::utils::errors::{Result, ThreadlineError};

/// Permission levels for different operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ManageLeads,
    ManageOrders,
    ManageDesigns,
    ManageCamps,
    ManageRoster,
    ManageTravel,
    ManageResearch,
    ManageUsers,
    UseMailbox,
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    /// Role at issue time
    pub role: String,
    /// Token identifier, used for revocation
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authentication context for a user
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: UserRole,
    pub permissions: HashSet<Permission>,
    pub visible_pages: Vec<String>,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Permissions granted to each role
pub fn role_permissions(role: UserRole) -> HashSet<Permission> {
    let mut permissions = HashSet::new();
    permissions.insert(Permission::UseMailbox);

    match role {
        UserRole::Admin => {
            permissions.extend([
                Permission::ManageLeads,
                Permission::ManageOrders,
                Permission::ManageDesigns,
                Permission::ManageCamps,
                Permission::ManageRoster,
                Permission::ManageTravel,
                Permission::ManageResearch,
                Permission::ManageUsers,
            ]);
        }
        UserRole::Sales => {
            permissions.extend([Permission::ManageLeads, Permission::ManageOrders]);
        }
        UserRole::Designer => {
            permissions.extend([Permission::ManageDesigns, Permission::ManageResearch]);
        }
        UserRole::Production => {
            permissions.insert(Permission::ManageOrders);
        }
        UserRole::CampManager => {
            permissions.extend([
                Permission::ManageCamps,
                Permission::ManageRoster,
                Permission::ManageTravel,
            ]);
        }
    }

    permissions
}

/// Authentication service for sessions and access control
#[derive(Debug, Clone)]
pub struct AuthService {
    settings: Settings,
    user_repository: UserRepository,
    redis_service: RedisService,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(
        settings: Settings,
        user_repository: UserRepository,
        redis_service: RedisService,
    ) -> Self {
        Self {
            settings,
            user_repository,
            redis_service,
        }
    }

    /// Generate a random password salt
    pub fn generate_salt() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect()
    }

    /// Compute the salted password digest
    pub fn hash_password(password: &str, salt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Verify a password against a stored digest
    pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
        Self::hash_password(password, salt) == expected_hash
    }

    /// Authenticate a user and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
        debug!(email = %email, "Login attempt");

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| ThreadlineError::Authentication("Invalid credentials".to_string()))?;

        if !user.is_active {
            warn!(user_id = user.id, "Login attempt for deactivated user");
            return Err(ThreadlineError::Authentication(
                "Account is deactivated".to_string(),
            ));
        }

        if !Self::verify_password(password, &user.password_salt, &user.password_hash) {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(ThreadlineError::Authentication(
                "Invalid credentials".to_string(),
            ));
        }

        let token = self.issue_token(&user)?;
        info!(user_id = user.id, role = %user.role, "User logged in");
        Ok((token, user))
    }

    /// Issue a session token for a user
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = chrono::Utc::now();
        let expires = now + chrono::Duration::hours(self.settings.auth.token_ttl_hours);

        let claims = Claims {
            sub: user.id,
            role: user.role.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a session token and return its claims
    pub async fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        let claims = data.claims;

        if self.is_revoked(&claims.jti).await? {
            return Err(ThreadlineError::Authentication(
                "Session has been revoked".to_string(),
            ));
        }

        Ok(claims)
    }

    /// Revoke a session until its natural expiry
    pub async fn logout(&self, claims: &Claims) -> Result<()> {
        let remaining = claims.exp - chrono::Utc::now().timestamp();
        let ttl = remaining.max(60) as u64;

        self.redis_service
            .set(&format!("revoked:{}", claims.jti), &true, Some(ttl))
            .await?;

        info!(user_id = claims.sub, "Session revoked");
        Ok(())
    }

    /// Whether a token id has been revoked
    pub async fn is_revoked(&self, jti: &str) -> Result<bool> {
        self.redis_service.exists(&format!("revoked:{}", jti)).await
    }

    /// Load the authenticated user for verified claims
    pub async fn load_user(&self, claims: &Claims) -> Result<User> {
        let user = self
            .user_repository
            .find_by_id(claims.sub)
            .await?
            .ok_or(ThreadlineError::UserNotFound { user_id: claims.sub })?;

        if !user.is_active {
            return Err(ThreadlineError::Authentication(
                "Account is deactivated".to_string(),
            ));
        }

        Ok(user)
    }

    /// Get authentication context for a user
    pub fn get_auth_context(&self, user: &User) -> Result<AuthContext> {
        let role = UserRole::parse(&user.role)
            .ok_or_else(|| ThreadlineError::InvalidInput(format!("Unknown role: {}", user.role)))?;

        Ok(AuthContext {
            user_id: user.id,
            role,
            permissions: role_permissions(role),
            visible_pages: user.visible_pages.clone(),
        })
    }

    /// Require specific permission or return error
    pub fn require_permission(&self, context: &AuthContext, required: Permission) -> Result<()> {
        if context.permissions.contains(&required) {
            return Ok(());
        }

        warn!(
            user_id = context.user_id,
            role = %context.role,
            permission = ?required,
            "Permission denied"
        );
        Err(ThreadlineError::PermissionDenied(format!(
            "Role {} lacks required permission: {:?}",
            context.role, required
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_digest_round_trip() {
        let salt = AuthService::generate_salt();
        let hash = AuthService::hash_password("sew-it-up", &salt);
        assert!(AuthService::verify_password("sew-it-up", &salt, &hash));
        assert!(!AuthService::verify_password("wrong", &salt, &hash));
    }

    #[test]
    fn salts_are_unique() {
        assert_ne!(AuthService::generate_salt(), AuthService::generate_salt());
    }

    #[test]
    fn admin_holds_every_permission() {
        let perms = role_permissions(UserRole::Admin);
        assert!(perms.contains(&Permission::ManageUsers));
        assert!(perms.contains(&Permission::ManageLeads));
        assert!(perms.contains(&Permission::ManageTravel));
    }

    #[test]
    fn sales_cannot_manage_users() {
        let perms = role_permissions(UserRole::Sales);
        assert!(perms.contains(&Permission::ManageLeads));
        assert!(!perms.contains(&Permission::ManageUsers));
    }

    #[test]
    fn every_role_can_use_mailbox() {
        for role in UserRole::all() {
            assert!(role_permissions(*role).contains(&Permission::UseMailbox));
        }
    }
}
