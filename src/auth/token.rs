// JWT token codec: minting and verification of stateless bearer tokens

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::auth::models::{Role, User};

/// JWT claims structure
///
/// `sub` carries the principal's email; `role` is the role at mint time and
/// is only advisory, since the authentication gate re-reads the stored role
/// on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Errors from token verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Structurally unparseable token, including any token whose header
    /// declares an algorithm other than HS256
    #[error("malformed token")]
    Malformed,

    /// Signature does not match the claims under the configured secret
    #[error("invalid signature")]
    InvalidSignature,

    /// Token is past its expiry
    #[error("expired token")]
    Expired,
}

/// Token codec holding the process-wide signing secret
///
/// Constructed once at startup from `AppConfig`; the secret is never read
/// from ambient state after that.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    /// Mint a signed token for a principal
    ///
    /// Claims: subject = email, role at mint time, iat = now,
    /// exp = now + TTL. There is no refresh; expiry forces re-login.
    pub fn mint(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenMint(e.to_string()))
    }

    /// Verify a token string and return its claims
    ///
    /// The algorithm is pinned to HS256: a token asserting any other
    /// algorithm (including "none") is rejected as malformed. No clock-skew
    /// grace window is applied.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";
    const TEST_TTL: i64 = 86_400;

    fn test_codec() -> TokenCodec {
        TokenCodec::new(TEST_SECRET, TEST_TTL)
    }

    fn test_user(email: &str, role: Role) -> User {
        User {
            id: 1,
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            role,
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    #[test]
    fn mint_verify_round_trip_preserves_identity() {
        let codec = test_codec();
        let user = test_user("a@x.com", Role::User);

        let token = codec.mint(&user).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp - claims.iat, TEST_TTL);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "a@x.com".to_string(),
            role: Role::User,
            iat: now - 1000,
            exp: now - 1,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(test_codec().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_secret_fails_signature_check() {
        let foreign = TokenCodec::new("some_other_secret", TEST_TTL);
        let token = foreign.mint(&test_user("a@x.com", Role::User)).unwrap();

        assert_eq!(test_codec().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn non_hs256_algorithm_is_rejected() {
        // Same secret, different declared algorithm: must never verify
        let claims = Claims {
            sub: "a@x.com".to_string(),
            role: Role::Admin,
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + TEST_TTL,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(test_codec().verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn stripped_signature_is_rejected() {
        let codec = test_codec();
        let token = codec.mint(&test_user("a@x.com", Role::User)).unwrap();
        let (head, _sig) = token.rsplit_once('.').unwrap();

        assert!(codec.verify(&format!("{}.", head)).is_err());
        assert!(codec.verify(head).is_err());
    }

    #[test]
    fn verify_results_compare_directly() {
        // Both sides of the verify Result are comparable values, so tests can
        // assert on the whole Result instead of unwrapping.
        let codec = test_codec();
        let token = codec.mint(&test_user("a@x.com", Role::User)).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(codec.verify(&token), Ok(claims.clone()));
        assert_eq!(claims, claims.clone());
        assert_eq!(codec.verify("junk"), Err(TokenError::Malformed));
    }

    #[test]
    fn garbage_tokens_are_malformed() {
        let codec = test_codec();
        assert_eq!(codec.verify(""), Err(TokenError::Malformed));
        assert_eq!(codec.verify("not.a.token"), Err(TokenError::Malformed));
        assert_eq!(codec.verify("plaintext"), Err(TokenError::Malformed));
    }

    proptest! {
        // Flipping any single character of a minted token must never verify.
        #[test]
        fn prop_single_character_tamper_never_verifies(
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)",
            pos_seed in 0usize..4096,
            replacement in "[A-Za-z0-9_-]"
        ) {
            let codec = test_codec();
            let token = codec.mint(&test_user(&email, Role::User)).unwrap();

            let bytes = token.as_bytes();
            let pos = pos_seed % bytes.len();
            let new_char = replacement.as_bytes()[0];
            prop_assume!(bytes[pos] != new_char && bytes[pos] != b'.');

            let mut tampered = bytes.to_vec();
            tampered[pos] = new_char;
            let tampered = String::from_utf8(tampered).unwrap();

            let result = codec.verify(&tampered);
            prop_assert!(matches!(
                result,
                Err(TokenError::InvalidSignature) | Err(TokenError::Malformed)
            ));
        }

        #[test]
        fn prop_round_trip_for_any_principal(
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)",
            admin in proptest::bool::ANY
        ) {
            let codec = test_codec();
            let role = if admin { Role::Admin } else { Role::User };
            let token = codec.mint(&test_user(&email, role)).unwrap();
            let claims = codec.verify(&token).unwrap();
            prop_assert_eq!(claims.sub, email);
            prop_assert_eq!(claims.role, role);
        }
    }
}
