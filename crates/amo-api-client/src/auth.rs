//! JWT signing for AMO API requests.
//!
//! The service expects an HS256 token whose issuer is the API key, signed
//! with the API secret, sent as `Authorization: JWT <token>`. A fresh token
//! is signed for every request.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Token lifetime in seconds
pub const TOKEN_TTL_SECS: i64 = 300;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer (the API key)
    pub iss: String,
    /// Unique per token
    pub jti: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiry timestamp
    pub exp: i64,
}

/// API key and secret issued by the service
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a short-lived token for a single request
    pub fn sign_token(&self) -> Result<String, jsonwebtoken::errors::Error> {
        let issued_at = Utc::now().timestamp();
        let claims = Claims {
            iss: self.api_key.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.api_secret.as_bytes()),
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
