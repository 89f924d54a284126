use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::auth::error::AuthError;
use crate::auth::password::{validate_password_strength, PasswordScheme};
use crate::auth::repo::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Register a new user. The email existence pre-check gives a friendly
/// failure in the common case; the unique constraint is the authoritative
/// guard when two registrations race, and both paths report `DuplicateEmail`.
pub async fn register_user(
    db: &PgPool,
    scheme: &dyn PasswordScheme,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    validate_password_strength(password)?;

    if User::find_by_email(db, email).await?.is_some() {
        return Err(AuthError::DuplicateEmail);
    }

    let hash = scheme
        .hash(password)
        .map_err(|e| AuthError::Hash(e.to_string()))?;

    match User::create(db, email, &hash).await {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            warn!(email = %email, "registration lost race to unique constraint");
            Err(AuthError::DuplicateEmail)
        }
        Err(e) => Err(e.into()),
    }
}

/// Look up a user by email and check the password against the stored hash.
/// Returns `Ok(None)` for unknown email and for wrong password alike, so the
/// caller cannot tell the two apart.
pub async fn authenticate(
    db: &PgPool,
    scheme: &dyn PasswordScheme,
    email: &str,
    password: &str,
) -> Result<Option<User>, AuthError> {
    let Some(user) = User::find_by_email(db, email).await? else {
        debug!("authentication failed");
        return Ok(None);
    };

    let ok = scheme
        .verify(password, &user.password_hash)
        .map_err(|e| AuthError::Hash(e.to_string()))?;

    if !ok {
        debug!("authentication failed");
        return Ok(None);
    }

    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_emails() {
        assert!(is_valid_email("u@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaced out@x.com"));
        assert!(!is_valid_email(""));
    }
}
