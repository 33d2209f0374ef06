//! Argon2 password hashing implementation.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use quill_core::ports::{AuthError, PasswordService};

/// Argon2-based password service. Hashes are salted and adaptive; the
/// plaintext is never recoverable.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, digest: &str) -> bool {
        // A digest that does not parse is simply not a match.
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();
        let password = "secure_password_123";

        let digest = service.hash(password).unwrap();
        assert!(service.verify(password, &digest));
        assert!(!service.verify("wrong_password", &digest));
    }

    #[test]
    fn test_hashing_is_salted() {
        let service = Argon2PasswordService::new();

        let first = service.hash("secure_password_123").unwrap();
        let second = service.hash("secure_password_123").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        let service = Argon2PasswordService::new();

        assert!(!service.verify("secure_password_123", "not-a-phc-string"));
        assert!(!service.verify("secure_password_123", ""));
    }
}
