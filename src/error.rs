/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - 認証失敗 (401) と認可失敗 (403) を別クラスとして表現する
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// 認証失敗の種類。
///
/// レスポンスの形 (status / code) は同じで、message だけが異なる。
/// 「token が不正」と「token は正しいが user が存在しない」は同じ `TokenFailed` に畳む。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    NoToken,
    TokenFailed,
}

impl AuthFailure {
    fn message(self) -> &'static str {
        match self {
            AuthFailure::NoToken => "not authorized, no token",
            AuthFailure::TokenFailed => "not authorized, token failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized: {}", .0.message())]
    Unauthorized(AuthFailure),
    #[error("forbidden: {required} role required")]
    Forbidden { required: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(required: impl Into<String>) -> Self {
        Self::Forbidden {
            required: required.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::BadRequest { code, message } => (code, message),
            AppError::Unauthorized(failure) => ("UNAUTHORIZED", failure.message().into()),
            AppError::Forbidden { required } => (
                "FORBIDDEN",
                format!("access denied: {required} role required"),
            ),
            AppError::NotFound { resource } => ("NOT_FOUND", format!("{resource} not found.")),
            AppError::Internal => ("INTERNAL_SERVER_ERROR", "internal server error".into()),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = ?e, "repository failure");
        match e {
            RepoError::Db(_) => AppError::Internal,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredential => AppError::Unauthorized(AuthFailure::NoToken),
            AuthError::InvalidCredential(_) | AuthError::UnknownSubject => {
                AppError::Unauthorized(AuthFailure::TokenFailed)
            }
            AuthError::Store(_) => AppError::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_and_authorization_failures_use_distinct_statuses() {
        assert_eq!(
            AppError::Unauthorized(AuthFailure::NoToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthorized(AuthFailure::TokenFailed).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::forbidden("admin").status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unknown_subject_and_bad_token_collapse_to_the_same_failure() {
        let unknown = AppError::from(AuthError::UnknownSubject);
        let invalid = AppError::from(AuthError::InvalidCredential("expired".into()));
        assert!(matches!(
            unknown,
            AppError::Unauthorized(AuthFailure::TokenFailed)
        ));
        assert!(matches!(
            invalid,
            AppError::Unauthorized(AuthFailure::TokenFailed)
        ));
    }

    #[test]
    fn forbidden_message_names_required_role() {
        let err = AppError::forbidden("admin");
        assert_eq!(err.to_string(), "forbidden: admin role required");
    }
}
