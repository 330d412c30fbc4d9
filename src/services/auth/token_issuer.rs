use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;

use super::access_jwt::AccessTokenClaims;

/// Signs HS256 access tokens with the shared secret.
///
/// The login flow that normally owns this lives outside this service; the
/// issuer is here for `token-gen` and tests.
#[derive(Clone)]
pub struct AccessTokenIssuer {
    encoding_key: EncodingKey,
    ttl_seconds: u64,
}

impl AccessTokenIssuer {
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            exp: now + self.ttl_seconds,
            iat: Some(now),
        };

        self.sign(&claims)
    }

    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, jsonwebtoken::errors::Error> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key)
    }
}
