//! Request authentication: credential → verified subject → identity.
//!
//! Every outcome other than `Ok(Identity)` ends the request. The three
//! credential-level failures are kept apart here for logging only; callers map
//! invalid token and unknown subject to the same response.

use std::{fmt, sync::Arc};

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::CookieJar;

use crate::domain::Identity;
use crate::repos::{error::RepoError, user_repo::UserStore};
use crate::services::auth::access_jwt::AccessTokenVerifier;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no credential presented")]
    MissingCredential,
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    #[error("credential subject does not resolve to a user")]
    UnknownSubject,
    #[error("identity store failure")]
    Store(#[source] RepoError),
}

pub struct Authenticator {
    verifier: AccessTokenVerifier,
    users: Arc<dyn UserStore>,
    cookie_name: String,
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("verifier", &self.verifier)
            .field("cookie_name", &self.cookie_name)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn new(
        verifier: AccessTokenVerifier,
        users: Arc<dyn UserStore>,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            verifier,
            users,
            cookie_name: cookie_name.into(),
        }
    }

    /// Cookie first, then `Authorization: Bearer <token>`. Empty values are absent.
    pub fn credential_from(&self, headers: &HeaderMap) -> Option<String> {
        let jar = CookieJar::from_headers(headers);
        if let Some(cookie) = jar.get(&self.cookie_name)
            && !cookie.value().trim().is_empty()
        {
            return Some(cookie.value().trim().to_string());
        }

        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }

    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let token = self
            .credential_from(headers)
            .ok_or(AuthError::MissingCredential)?;

        let verified = self
            .verifier
            .verify_verified(&token)
            .map_err(|e| AuthError::InvalidCredential(e.to_string()))?;

        let row = self
            .users
            .find_identity(verified.user_id)
            .await
            .map_err(AuthError::Store)?
            .ok_or(AuthError::UnknownSubject)?;

        Identity::try_from(row).map_err(|e| AuthError::InvalidCredential(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::{error::RepoResult, user_repo::UserRow};
    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    struct EmptyStore;

    #[async_trait]
    impl UserStore for EmptyStore {
        async fn find_identity(&self, _user_id: Uuid) -> RepoResult<Option<UserRow>> {
            Ok(None)
        }
    }

    fn authenticator() -> Authenticator {
        Authenticator::new(
            AccessTokenVerifier::new(b"unit-test-secret-unit-test-secret!!", 60),
            Arc::new(EmptyStore),
            "accessToken",
        )
    }

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn cookie_takes_precedence_over_header() {
        let h = headers(&[
            (header::COOKIE, "theme=dark; accessToken=from-cookie"),
            (header::AUTHORIZATION, "Bearer from-header"),
        ]);
        assert_eq!(
            authenticator().credential_from(&h).as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn empty_cookie_falls_back_to_header() {
        let h = headers(&[
            (header::COOKIE, "accessToken="),
            (header::AUTHORIZATION, "Bearer from-header"),
        ]);
        assert_eq!(
            authenticator().credential_from(&h).as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn header_without_bearer_prefix_is_no_credential() {
        for value in ["Basic abc", "bearer abc", "Bearer ", "abc"] {
            let h = headers(&[(header::AUTHORIZATION, value)]);
            assert_eq!(authenticator().credential_from(&h), None, "{value}");
        }
    }

    #[test]
    fn other_cookie_names_are_ignored() {
        let h = headers(&[(header::COOKIE, "token=abc")]);
        assert_eq!(authenticator().credential_from(&h), None);
    }

    #[tokio::test]
    async fn missing_credential_is_reported_as_such() {
        let err = authenticator()
            .authenticate(&HeaderMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential));
    }

    #[tokio::test]
    async fn malformed_token_is_invalid_credential() {
        let h = headers(&[(header::AUTHORIZATION, "Bearer a.b.c")]);
        let err = authenticator().authenticate(&h).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential(_)));
    }
}
