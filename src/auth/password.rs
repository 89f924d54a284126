use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::auth::error::AuthError;

/// Hashing strategy the credential operations are parameterized over, so the
/// algorithm is injected rather than reached for globally.
pub trait PasswordScheme: Send + Sync {
    fn hash(&self, plain: &str) -> anyhow::Result<String>;
    fn verify(&self, plain: &str, hash: &str) -> anyhow::Result<bool>;
}

/// Argon2id with library defaults and a fresh random salt per hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Scheme;

impl PasswordScheme for Argon2Scheme {
    fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                anyhow::anyhow!(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, plain: &str, hash: &str) -> anyhow::Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            anyhow::anyhow!(e.to_string())
        })?;
        Ok(Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Minimum length 8, at least one letter, at least one digit.
pub fn validate_password_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < 8 {
        return Err(AuthError::WeakPassword("must be at least 8 characters"));
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(AuthError::WeakPassword("must contain a letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword("must contain a digit"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let scheme = Argon2Scheme;
        let password = "Secur3P@ssw0rd!";
        let hash = scheme.hash(password).expect("hashing should succeed");
        assert!(scheme.verify(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let scheme = Argon2Scheme;
        let hash = scheme
            .hash("correct-horse-battery-1")
            .expect("hashing should succeed");
        assert!(!scheme
            .verify("wrong-password-2", &hash)
            .expect("verify should not error"));
    }

    #[test]
    fn hashing_is_salted() {
        let scheme = Argon2Scheme;
        let a = scheme.hash("same-input-9").expect("hash a");
        let b = scheme.hash("same-input-9").expect("hash b");
        assert_ne!(a, b);
        assert!(scheme.verify("same-input-9", &a).expect("verify a"));
        assert!(scheme.verify("same-input-9", &b).expect("verify b"));
    }

    #[test]
    fn hash_never_stores_plaintext() {
        let scheme = Argon2Scheme;
        let hash = scheme.hash("pass1234").expect("hash");
        assert_ne!(hash, "pass1234");
        assert!(!hash.contains("pass1234"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let scheme = Argon2Scheme;
        let err = scheme.verify("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn strength_accepts_letter_and_digit_of_length_8() {
        assert!(validate_password_strength("pass1234").is_ok());
        assert!(validate_password_strength("a1234567").is_ok());
        assert!(validate_password_strength("longerpassword1").is_ok());
    }

    #[test]
    fn strength_rejects_short_passwords() {
        let err = validate_password_strength("ab1").unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
        assert!(validate_password_strength("a234567").is_err());
    }

    #[test]
    fn strength_rejects_missing_letter() {
        assert!(matches!(
            validate_password_strength("12345678"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn strength_rejects_missing_digit() {
        assert!(matches!(
            validate_password_strength("passwords"),
            Err(AuthError::WeakPassword(_))
        ));
    }
}
