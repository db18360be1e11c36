//! Authentication service.
//!
//! Provides password authentication plus the email-verification and
//! password-reset link flows. Tokens are random 256-bit values sent to the
//! user as hex; only their SHA-256 hash is stored.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use cyna_core::{Email, Role, UserId};

use crate::db::tokens::TokenPurpose;
use crate::db::{RepositoryError, TokenRepository, UserRepository};
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles registration, login, email verification, and password resets.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: TokenRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens: TokenRepository::new(pool),
        }
    }

    // =========================================================================
    // Registration & login
    // =========================================================================

    /// Register a new client user with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&email, &password_hash, first_name, last_name, Role::Client)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    // =========================================================================
    // Email verification
    // =========================================================================

    /// Issue an email-verification token for a user.
    ///
    /// Returns the cleartext token to embed in the emailed link. Any earlier
    /// verification token for the user stops working.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn issue_verification_token(&self, user_id: UserId) -> Result<String, AuthError> {
        self.issue_token(user_id, TokenPurpose::VerifyEmail).await
    }

    /// Consume a verification token and mark the user's email verified.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is unknown or expired.
    pub async fn verify_email(&self, token: &str) -> Result<UserId, AuthError> {
        let user_id = self
            .tokens
            .consume(&hash_token(token), TokenPurpose::VerifyEmail)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::InvalidToken,
                other => AuthError::Repository(other),
            })?;

        self.users.mark_email_verified(user_id).await?;
        Ok(user_id)
    }

    // =========================================================================
    // Password reset
    // =========================================================================

    /// Start a password reset for the given address.
    ///
    /// Returns the user and a cleartext token, or `None` when no account
    /// matches - the route responds 200 either way so the endpoint cannot be
    /// used to probe for accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    pub async fn start_password_reset(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, AuthError> {
        let email = Email::parse(email)?;

        let Some(user) = self.users.get_by_email(&email).await? else {
            return Ok(None);
        };

        let token = self.issue_token(user.id, TokenPurpose::ResetPassword).await?;
        Ok(Some((user, token)))
    }

    /// Consume a reset token and set the new password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is unknown or expired.
    /// Returns `AuthError::WeakPassword` if the new password fails validation.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<UserId, AuthError> {
        validate_password(new_password)?;

        let user_id = self
            .tokens
            .consume(&hash_token(token), TokenPurpose::ResetPassword)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::InvalidToken,
                other => AuthError::Repository(other),
            })?;

        let password_hash = hash_password(new_password)?;
        self.users
            .update_password_hash(user_id, &password_hash)
            .await?;

        Ok(user_id)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    async fn issue_token(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
    ) -> Result<String, AuthError> {
        let token = generate_token();
        let expires_at = Utc::now() + purpose.ttl();

        self.tokens
            .store(user_id, &hash_token(&token), purpose, expires_at)
            .await?;

        Ok(token)
    }
}

/// Generate a random 256-bit token, hex-encoded.
fn generate_token() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// SHA-256 hash of a token, hex-encoded, as stored in the database.
fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough password").is_ok());
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(verify_password("wrong password", &hash).is_err());
    }

    #[test]
    fn test_generate_token_format() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_token_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn test_hash_token_stable() {
        let token = "abc123";
        assert_eq!(hash_token(token), hash_token(token));
        assert_ne!(hash_token(token), hash_token("abc124"));
        // SHA-256 hex digest
        assert_eq!(hash_token(token).len(), 64);
    }
}
