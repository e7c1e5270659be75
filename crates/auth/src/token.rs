use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use byline_core::UserId;

use crate::claims::{Claims, TokenValidationError, validate_claims};

#[derive(Debug, Error)]
pub enum TokenError {
    /// The token failed decoding or signature verification.
    #[error("token rejected: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// Decoding succeeded but the claims failed time-window validation.
    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("token encoding failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

/// Verifies a bearer token and returns its claims.
///
/// Object-safe so the HTTP layer can hold an `Arc<dyn TokenValidator>` and
/// tests can substitute their own.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError>;
}

/// HS256 symmetric-key codec: issues tokens at login and verifies them on
/// every authenticated request.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Mint a signed token for `sub`, valid from `now` for `ttl`.
    pub fn issue(
        &self,
        sub: UserId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub,
            issued_at: now,
            expires_at: now + ttl,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encode)
    }
}

impl TokenValidator for Hs256TokenCodec {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // The time window lives in our own issued_at/expires_at claims and
        // is checked by validate_claims; the registered exp claim is unused.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(TokenError::Invalid)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
