//! Admin authentication
//!
//! Email/password login against bcrypt hashes, answered with an HS256
//! JWT that carries the user id. Write endpoints verify the token via
//! [`crate::http::extractors::AuthUser`].

pub mod bootstrap;
pub mod password;
pub mod token;

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::models::{Email, NewUser, User, ValidationError};
use crate::store::{ContentStore, StoreError};

pub use bootstrap::{seed_admin, AdminSeed, SeedOutcome};
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer};

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Default token lifetime (24h)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Longest token lifetime the CLI accepts (one year)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token lifetime out of range: {0:?}")]
    TokenLifetime(Duration),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Settings for hashing and token issuance
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Check credentials and issue a token.
pub async fn login(
    store: &dyn ContentStore,
    tokens: &TokenIssuer,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AuthError> {
    let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;
    let user = store
        .find_user_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash).await? {
        return Err(AuthError::InvalidCredentials);
    }

    let token = tokens.issue(user.id)?;
    tracing::info!(user_id = %user.id, "login succeeded");
    Ok(LoginOutcome { token, user })
}

/// Hash the password and store a new user.
pub async fn register_user(
    store: &dyn ContentStore,
    email: &str,
    password: &str,
    name: &str,
    bcrypt_cost: u32,
) -> Result<User, AuthError> {
    let email = Email::new(email)?;
    if password.is_empty() {
        return Err(ValidationError::Empty { field: "password" }.into());
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Empty { field: "name" }.into());
    }

    let password_hash = hash_password(password, bcrypt_cost).await?;
    let user = store
        .create_user(NewUser {
            email,
            password_hash,
            name: name.to_owned(),
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "user created");
    Ok(user)
}
