use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use yiya_auth_types::token::AuthError;
use yiya_core::error::error_response;

/// Mini-program service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum MpServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("wechat error: {0}")]
    WeChat(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MpServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::WeChat(_) => "WECHAT_ERROR",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<AuthError> for MpServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Signing(e) => Self::Internal(e.into()),
            _ => Self::InvalidToken,
        }
    }
}

impl IntoResponse for MpServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::WeChat(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::WeChat(msg) => {
                tracing::warn!(error = %msg, kind = "WECHAT_ERROR", "wechat call failed")
            }
            _ => {}
        }
        error_response(status, self.kind(), self.to_string())
    }
}
