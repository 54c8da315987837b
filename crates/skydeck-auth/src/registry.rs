use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl AuthError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Username or password is incorrect.",
            Self::Hash(_) => "Sign-in is unavailable right now. Please try again.",
        }
    }
}

/// One configured dashboard account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub username: String,
    /// bcrypt hash, as produced by [`hash_password`].
    pub password_hash: String,
}

/// The configured dashboard accounts.
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    users: Vec<UserEntry>,
}

impl UserRegistry {
    pub fn from_entries(users: Vec<UserEntry>) -> Self {
        Self { users }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check a username/password pair against the registry.
    ///
    /// Unknown user, wrong password and an undecodable stored hash all
    /// come back as a plain `false`; callers cannot distinguish them.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let Some(user) = self.users.iter().find(|u| u.username == username) else {
            tracing::debug!("login attempt for unknown user");
            return false;
        };
        bcrypt::verify(password, &user.password_hash).unwrap_or(false)
    }
}

/// Hash a plaintext password for storage in the registry.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    Ok(bcrypt::hash(plain, bcrypt::DEFAULT_COST)?)
}
