//! Token Issuer / Verifier
//!
//! Stateless HS256 bearer tokens. The accepted algorithm is pinned: a
//! token whose header names any other algorithm is treated as forged.
//! Expiry is checked against a caller-supplied clock rather than the
//! wall clock, and a token is already invalid at its exact expiry
//! instant.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// Why a token was rejected
///
/// The distinction exists for logging only; callers collapse all three
/// into a single 401 before anything reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a parseable token (wrong segment count, bad base64, bad JSON,
    /// unparseable subject)
    #[error("token is malformed")]
    Malformed,
    /// Structurally valid but the signature does not verify under our key
    /// and pinned algorithm
    #[error("token signature is invalid")]
    BadSignature,
    /// Authentic but past its expiry instant
    #[error("token has expired")]
    Expired,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Role code at issue time (informational; authorization re-reads
    /// the user record)
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Verified token contents
#[derive(Debug, Clone)]
pub struct TokenPayload {
    pub user_id: UserId,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies bearer tokens with a fixed key and TTL
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    /// Create an issuer from a raw HMAC secret and token lifetime
    pub fn new(secret: &[u8], ttl: std::time::Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_secs: ttl.as_secs() as i64,
        }
    }

    /// Issue a signed token for a user, valid for the configured TTL
    /// from `now`
    pub fn issue(
        &self,
        user_id: &UserId,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = TokenClaims {
            sub: user_id.to_string(),
            role: role.code().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify a token and return its payload
    ///
    /// Checks run in order: structure, signature (pinned to HS256),
    /// then expiry against `now`. `now >= exp` is expired.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenPayload, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the caller's clock
        validation.validate_exp = false;
        validation.leeway = 0;

        let data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    JwtErrorKind::InvalidSignature
                    | JwtErrorKind::InvalidAlgorithm
                    | JwtErrorKind::InvalidAlgorithmName => TokenError::BadSignature,
                    JwtErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed,
                }
            })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        let user_id =
            UserId::parse_str(&data.claims.sub).map_err(|_| TokenError::Malformed)?;

        Ok(TokenPayload {
            user_id,
            role: data.claims.role,
            expires_at: DateTime::from_timestamp(data.claims.exp, 0).unwrap_or(now),
        })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: std::time::Duration = std::time::Duration::from_secs(30 * 60);

    fn issuer(secret: &[u8]) -> TokenIssuer {
        TokenIssuer::new(secret, TTL)
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_roundtrip_within_ttl() {
        let issuer = issuer(b"test-secret-key");
        let user_id = UserId::new();
        let token = issuer.issue(&user_id, UserRole::Admin, now()).unwrap();

        let at = now() + Duration::seconds(TTL.as_secs() as i64 - 1);
        let payload = issuer.verify(&token, at).unwrap();
        assert_eq!(payload.user_id, user_id);
        assert_eq!(payload.role, "ADMIN");
    }

    #[test]
    fn test_expired_at_exact_instant() {
        let issuer = issuer(b"test-secret-key");
        let token = issuer.issue(&UserId::new(), UserRole::User, now()).unwrap();

        let at_exp = now() + Duration::seconds(TTL.as_secs() as i64);
        assert_eq!(issuer.verify(&token, at_exp).unwrap_err(), TokenError::Expired);

        let past_exp = at_exp + Duration::seconds(1);
        assert_eq!(issuer.verify(&token, past_exp).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_wrong_key_is_bad_signature() {
        let token = issuer(b"key-one")
            .issue(&UserId::new(), UserRole::User, now())
            .unwrap();
        assert_eq!(
            issuer(b"key-two").verify(&token, now()).unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let issuer = issuer(b"test-secret-key");
        let token = issuer.issue(&UserId::new(), UserRole::User, now()).unwrap();

        // Swap the payload segment for a forged one
        let mut parts: Vec<&str> = token.split('.').collect();
        let other = issuer.issue(&UserId::new(), UserRole::Admin, now()).unwrap();
        let other_parts: Vec<&str> = other.split('.').collect();
        parts[1] = other_parts[1];
        let forged = parts.join(".");

        assert_eq!(issuer.verify(&forged, now()).unwrap_err(), TokenError::BadSignature);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let issuer = issuer(b"test-secret-key");
        for garbage in ["", "abc", "a.b", "a.b.c.d", "not a token at all"] {
            assert_eq!(
                issuer.verify(garbage, now()).unwrap_err(),
                TokenError::Malformed,
                "input: {garbage:?}"
            );
        }
    }

    #[test]
    fn test_unsigned_algorithm_is_rejected() {
        // Header {"alg":"none"} with an empty signature segment must not
        // verify even though the payload parses.
        let issuer = issuer(b"test-secret-key");
        let token = issuer.issue(&UserId::new(), UserRole::User, now()).unwrap();
        let payload = token.split('.').nth(1).unwrap();

        // {"alg":"none","typ":"JWT"} base64url, no padding
        let header = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";
        let forged = format!("{header}.{payload}.");

        assert!(issuer.verify(&forged, now()).is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_malformed() {
        let issuer = issuer(b"test-secret-key");
        let claims = TokenClaims {
            sub: "not-a-uuid".to_string(),
            role: "USER".to_string(),
            iat: now().timestamp(),
            exp: now().timestamp() + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key"),
        )
        .unwrap();

        assert_eq!(issuer.verify(&token, now()).unwrap_err(), TokenError::Malformed);
    }
}
