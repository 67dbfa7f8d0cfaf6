// Password hashing and verification service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::auth::error::AuthError;

/// Password service for hashing and verification
///
/// Uses Argon2id with the crate's default parameters: a salted, adaptive
/// one-way digest in PHC string format.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a fresh random salt
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    /// Verify a password against a stored digest
    ///
    /// A malformed digest verifies to `false`, the same as a wrong password,
    /// so callers cannot tell format failures from content failures.
    pub fn verify_password(password: &str, digest: &str) -> bool {
        match PasswordHash::new(digest) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let digest = PasswordService::hash_password("correct horse battery").unwrap();
        assert!(PasswordService::verify_password("correct horse battery", &digest));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let digest = PasswordService::hash_password("pw1").unwrap();
        assert!(!PasswordService::verify_password("pw2", &digest));
    }

    #[test]
    fn malformed_digest_verifies_false_not_error() {
        assert!(!PasswordService::verify_password("pw", "not-a-phc-string"));
        assert!(!PasswordService::verify_password("pw", ""));
        assert!(!PasswordService::verify_password("pw", "$argon2id$garbage"));
    }

    #[test]
    fn salts_are_unique_per_hash() {
        let a = PasswordService::hash_password("same input").unwrap();
        let b = PasswordService::hash_password("same input").unwrap();
        assert_ne!(a, b);
        assert!(PasswordService::verify_password("same input", &a));
        assert!(PasswordService::verify_password("same input", &b));
    }
}
