//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{RegisterUser, UpdateUser, User, UserClaims, UserQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user
    pub async fn register(&self, user: RegisterUser) -> AppResult<User> {
        if self.repository.users.email_exists(&user.email, None).await? {
            return Err(AppError::field_validation("email", "The email has already been taken"));
        }

        let password_hash = self.hash_password(&user.password)?;
        self.repository.users.create(&user, &password_hash).await
    }

    /// Authenticate by email and password, returning a JWT token and
    /// the user
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Create JWT token for a user
    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// List users with pagination
    pub async fn list(&self, query: &UserQuery) -> AppResult<(Vec<User>, i64)> {
        self.repository.users.list(query).await
    }

    /// Update name/email/password of a user. Role is immutable through
    /// this path; email uniqueness excludes the current row.
    pub async fn update(&self, id: i32, user: UpdateUser) -> AppResult<User> {
        self.repository.users.get_by_id(id).await?;

        if let Some(ref email) = user.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::field_validation("email", "The email has already been taken"));
            }
        }

        // Password changes require a matching confirmation field
        let password_hash = if let Some(ref password) = user.password {
            if user.password_confirmation.as_deref() != Some(password.as_str()) {
                return Err(AppError::field_validation(
                    "password",
                    "Password confirmation does not match",
                ));
            }
            Some(self.hash_password(password)?)
        } else {
            None
        };

        self.repository.users.update(id, &user, password_hash).await
    }

    /// Delete a user
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users.get_by_id(id).await?;
        self.repository.users.delete(id).await
    }
}
