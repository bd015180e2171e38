//! User account operations: registration, login verification, profiles.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use roomhub_auth::password::PasswordHasher;
use roomhub_auth::policy::{self, Action};
use roomhub_core::error::AppError;
use roomhub_database::repositories::UserRepository;
use roomhub_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::context::RequestContext;

/// Handles registration, credential verification, and profile management.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Minimum accepted password length.
    password_min_length: usize,
}

/// Data for open registration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

/// Data for updating a user's own profile.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfileRequest {
    /// New email (optional).
    pub email: Option<String>,
    /// New plaintext password (optional).
    pub password: Option<String>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        password_min_length: usize,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            password_min_length,
        }
    }

    /// Registers a new guest account.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        if req.username.trim().is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        self.validate_email(&req.email)?;
        self.validate_password(&req.password)?;

        if self
            .user_repo
            .find_by_username(&req.username)
            .await?
            .is_some()
        {
            return Err(AppError::validation("Username is already taken"));
        }
        if self.user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::validation("Email is already registered"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: req.username,
                email: req.email,
                password_hash,
                role: UserRole::Guest,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Verifies login credentials, returning the user on success.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        let valid = self
            .hasher
            .verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Invalid username or password"));
        }

        Ok(user)
    }

    /// Fetches a user profile, visible to its owner and staff.
    pub async fn get_user(&self, ctx: &RequestContext, id: Uuid) -> Result<User, AppError> {
        policy::owner_or_staff().authorize(Some(&ctx.actor()), Action::Read, Some(id))?;

        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates a profile, permitted to its owner and staff.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        policy::owner_or_staff().authorize(Some(&ctx.actor()), Action::Write, Some(id))?;

        let mut update = UpdateUser::default();

        if let Some(email) = req.email {
            self.validate_email(&email)?;
            if let Some(existing) = self.user_repo.find_by_email(&email).await? {
                if existing.id != id {
                    return Err(AppError::conflict("Email is already in use"));
                }
            }
            update.email = Some(email);
        }

        if let Some(password) = req.password {
            self.validate_password(&password)?;
            update.password_hash = Some(self.hasher.hash_password(&password)?);
        }

        let user = self
            .user_repo
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %id, "Profile updated");

        Ok(user)
    }

    fn validate_email(&self, email: &str) -> Result<(), AppError> {
        if !email.contains('@') || !email.contains('.') {
            return Err(AppError::validation("Invalid email format"));
        }
        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }
        Ok(())
    }
}
