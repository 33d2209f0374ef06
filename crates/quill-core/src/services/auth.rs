//! Authentication orchestrator.
//!
//! The only trusted boundary for identity: credential lookup, password
//! verification and token issuance/validation all funnel through here, and
//! downstream components only ever receive an already-resolved identity,
//! never raw credentials or tokens.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Author, User};
use crate::error::DomainError;
use crate::ports::{PasswordService, TokenService, UserRepository};

/// A resolved identity: proof that the acting user exists right now.
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl UserIdentity {
    pub fn as_author(&self) -> Author {
        Author {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl From<&User> for UserIdentity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

pub struct AuthenticationService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthenticationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Check credentials and resolve the identity.
    ///
    /// "No such user" and "wrong password" collapse into the same
    /// `Unauthenticated` outcome so responses cannot be used to enumerate
    /// accounts.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Unauthenticated)?;

        if !self.passwords.verify(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "password verification failed");
            return Err(DomainError::Unauthenticated);
        }

        Ok(UserIdentity::from(&user))
    }

    /// Create an account. Does not log the new user in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        if self.users.exists_by_email(email).await? {
            return Err(DomainError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = self
            .users
            .save(User::new(
                name.to_string(),
                email.to_string(),
                password_hash,
            ))
            .await?;
        tracing::info!(user_id = %user.id, "registered new user");

        Ok(())
    }

    /// Mint a session token with the identity's email as subject.
    pub fn generate_token(&self, identity: &UserIdentity) -> Result<String, DomainError> {
        self.tokens
            .issue(&identity.email)
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Validate a token and re-resolve its subject to a live identity.
    ///
    /// Token failures and an unresolvable subject both surface as
    /// `Unauthenticated`; the caller never learns which.
    pub async fn validate_token(&self, token: &str) -> Result<UserIdentity, DomainError> {
        let claims = self.tokens.validate(token).map_err(|e| {
            tracing::debug!(error = %e, "token validation failed");
            DomainError::Unauthenticated
        })?;

        let user = self
            .users
            .find_by_email(&claims.subject)
            .await?
            .ok_or(DomainError::Unauthenticated)?;

        Ok(UserIdentity::from(&user))
    }

    /// The fixed token TTL in seconds, surfaced in the auth response.
    pub fn token_expires_in(&self) -> u64 {
        self.tokens.expires_in()
    }
}
