//! Stateless session tokens.
//!
//! Tokens are HS256 JWTs carrying `{sub, iat, exp}`. Validity is entirely
//! signature verification plus expiry; the server keeps no session table and
//! there is no revocation. Logout is a client-side action of discarding the
//! token.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id the token is bound to.
    pub sub: String,
    /// Issued-at, unix seconds.
    pub iat: u64,
    /// Expiry, unix seconds.
    pub exp: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token rejected: {0}")]
    Rejected(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies session tokens with a process-wide symmetric key.
pub struct SessionAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl SessionAuthority {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: a token past its expiry is invalid immediately
        validation.leeway = 0;

        SessionAuthority {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    /// Issue a token for an account id, expiring `ttl_secs` from now.
    pub fn issue(&self, account_id: &str) -> Result<String, TokenError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        self.sign(&Claims {
            sub: account_id.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        })
    }

    /// Sign explicit claims. `issue` is the normal entry point; this exists
    /// for callers that need full control over the timestamps.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        Ok(jsonwebtoken::encode(&Header::default(), claims, &self.encoding)?)
    }

    /// Verify a bearer token and return the account id it is bound to.
    ///
    /// Fails if the token is malformed, the signature does not verify, or the
    /// expiry has passed. Does not check that the account still exists.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims.sub)
    }
}
