//! Token issuance and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sn_model::Role;

use crate::claims::SessionClaims;
use crate::error::{TokenError, TokenResult};

/// Minimum signing key length in bytes (256 bits).
pub const MIN_KEY_BYTES: usize = 32;

/// Issues and validates HS256-signed session tokens.
///
/// Pure and stateless: safe for unbounded concurrent use. The key is
/// fixed at construction and read-only afterwards.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifespan: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .field("lifespan", &self.lifespan)
            .finish()
    }
}

impl TokenService {
    /// Creates a token service with the given symmetric key and token
    /// lifespan.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::KeyTooShort`] if the key is shorter than
    /// [`MIN_KEY_BYTES`].
    pub fn new(secret: &[u8], lifespan: Duration) -> TokenResult<Self> {
        if secret.len() < MIN_KEY_BYTES {
            return Err(TokenError::KeyTooShort {
                min: MIN_KEY_BYTES,
                actual: secret.len(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Exact expiry is invalid: no clock-skew leeway.
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifespan,
        })
    }

    /// Issues a signed token for the given identity and role.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if encoding fails.
    pub fn issue(&self, email: &str, role: Role) -> TokenResult<String> {
        let now = Utc::now();
        let claims = SessionClaims::new(
            email,
            role,
            now.timestamp(),
            (now + self.lifespan).timestamp(),
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validates a token and returns its claims.
    ///
    /// The integrity tag is verified before any claim is trusted; a bad
    /// tag, malformed structure, or elapsed expiry all yield the same
    /// [`TokenError::Invalid`].
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for any unacceptable token.
    pub fn validate(&self, token: &str) -> TokenResult<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        // jsonwebtoken accepts exp == now; the contract treats exact
        // expiry as already invalid.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }

    /// Returns the configured token lifespan.
    #[must_use]
    pub const fn lifespan(&self) -> Duration {
        self.lifespan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn service(lifespan: Duration) -> TokenService {
        TokenService::new(SECRET, lifespan).unwrap()
    }

    #[test]
    fn short_key_is_rejected() {
        let err = TokenService::new(b"too-short", Duration::hours(1)).unwrap_err();
        assert!(matches!(err, TokenError::KeyTooShort { actual: 9, .. }));
    }

    #[test]
    fn issue_then_validate_round_trips() {
        let service = service(Duration::hours(1));

        let token = service.issue("alice@example.com", Role::Admin).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_invalid() {
        let service = service(Duration::seconds(-60));

        let token = service.issue("alice@example.com", Role::User).unwrap();
        let err = service.validate(&token).unwrap_err();

        assert!(matches!(err, TokenError::Invalid));
    }

    #[test]
    fn exact_expiry_is_invalid() {
        let service = service(Duration::zero());

        let token = service.issue("alice@example.com", Role::User).unwrap();
        let err = service.validate(&token).unwrap_err();

        assert!(matches!(err, TokenError::Invalid));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let service = service(Duration::hours(1));

        let token = service.issue("alice@example.com", Role::User).unwrap();

        // Flip one character in the middle of the token.
        let mid = token.len() / 2;
        let original = token.as_bytes()[mid];
        let replacement = if original == b'x' { b'y' } else { b'x' };
        let mut bytes = token.into_bytes();
        bytes[mid] = replacement;
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            service.validate(&tampered),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let service = service(Duration::hours(1));

        assert!(matches!(
            service.validate("not-a-token"),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(service.validate(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn tokens_from_another_key_are_invalid() {
        let issuer = service(Duration::hours(1));
        let other =
            TokenService::new(b"ffffffffffffffffffffffffffffffff", Duration::hours(1)).unwrap();

        let token = issuer.issue("alice@example.com", Role::User).unwrap();

        assert!(matches!(other.validate(&token), Err(TokenError::Invalid)));
    }
}
