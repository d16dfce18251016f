//! Password value object - the credential manager.
//!
//! Hashing and verification go through Argon2id with a fresh random salt per
//! hash. There is no way back from a hash to its plaintext, and hashes are
//! never compared for equality against user input.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Password value object that handles hashing and verification.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with a fresh salt.
    ///
    /// # Errors
    /// Returns [`DomainError::Hashing`] if Argon2 fails.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::hashing(e.to_string()))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap an existing hash (loaded from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Consume and return the PHC string for storage.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check a plaintext candidate against this hash.
    ///
    /// A stored value that is not a valid PHC string can never match, so it
    /// is reported as a mismatch rather than an internal failure.
    pub fn verify(&self, plain_text: &str) -> DomainResult<()> {
        let parsed = PasswordHash::new(&self.hash).map_err(|_| DomainError::PasswordMismatch)?;
        argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .map_err(|_| DomainError::PasswordMismatch)
    }
}

#[inline]
fn argon2() -> Argon2<'static> {
    Argon2::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain).is_ok());
        assert_eq!(
            password.verify("WrongPassword123"),
            Err(DomainError::PasswordMismatch)
        );
    }

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hash = Password::new("pw1").unwrap().into_string();
        assert_ne!(hash, "pw1");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Password::new(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain).is_ok());
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert!(pass1.verify(plain).is_ok());
        assert!(pass2.verify(plain).is_ok());
        assert_ne!(pass1.into_string(), pass2.into_string());
    }

    #[test]
    fn test_short_passwords_are_accepted() {
        // Length policy belongs to the HTTP layer, not the hasher
        assert!(Password::new("pw1").is_ok());
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        assert_eq!(
            Password::from_hash("not-a-phc-string").verify("anything"),
            Err(DomainError::PasswordMismatch)
        );
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("hunter2").unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(&password.into_string()));
    }
}
