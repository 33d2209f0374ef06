//! Authentication ports: token signing and password hashing.

/// Claims carried by a session token. Not persisted anywhere; validity is
/// purely a function of signature and clock.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// The subject: the email of the user the token was issued to.
    pub subject: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Stateless token service.
///
/// Tokens are signed with a process-wide symmetric key loaded once at
/// startup. There is no revocation: the accepted tradeoff for not keeping a
/// server-side session store.
pub trait TokenService: Send + Sync {
    /// Mint a compact signed token for `subject`, expiring after the fixed TTL.
    fn issue(&self, subject: &str) -> Result<String, AuthError>;

    /// Verify signature and expiry. No clock-skew tolerance is applied.
    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// The fixed TTL in seconds, constant across all issuances.
    fn expires_in(&self) -> u64;
}

/// One-way adaptive password hashing.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password (salted, nondeterministic).
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a digest. A malformed digest verifies as
    /// false rather than raising.
    fn verify(&self, password: &str, digest: &str) -> bool;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
