use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use yiya_auth_types::token::AuthError;
use yiya_core::error::error_response;

/// Admin service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("role not found")]
    RoleNotFound,
    #[error("permission not found")]
    PermissionNotFound,
    #[error("menu not found")]
    MenuNotFound,
    #[error("username already exists")]
    UsernameExists,
    #[error("role code already exists")]
    RoleCodeExists,
    #[error("permission code already exists")]
    PermissionCodeExists,
    #[error("menu name already exists")]
    MenuNameExists,
    #[error("phone or email already in use")]
    ContactExists,
    #[error("protected role cannot be deleted")]
    ProtectedRole,
    #[error("cannot delete yourself")]
    CannotDeleteSelf,
    #[error("invalid parent menu")]
    InvalidParent,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("user disabled")]
    UserDisabled,
    #[error("missing permission: {}", .missing.join(", "))]
    Forbidden { missing: Vec<String> },
    #[error("super admin required")]
    SuperAdminRequired,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AdminServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::PermissionNotFound => "PERMISSION_NOT_FOUND",
            Self::MenuNotFound => "MENU_NOT_FOUND",
            Self::UsernameExists => "USERNAME_EXISTS",
            Self::RoleCodeExists => "ROLE_CODE_EXISTS",
            Self::PermissionCodeExists => "PERMISSION_CODE_EXISTS",
            Self::MenuNameExists => "MENU_NAME_EXISTS",
            Self::ContactExists => "CONTACT_EXISTS",
            Self::ProtectedRole => "PROTECTED_ROLE",
            Self::CannotDeleteSelf => "CANNOT_DELETE_SELF",
            Self::InvalidParent => "INVALID_PARENT",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::UserDisabled => "USER_DISABLED",
            Self::Forbidden { .. } | Self::SuperAdminRequired => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn forbidden<S: AsRef<str>>(missing: &[S]) -> Self {
        Self::Forbidden {
            missing: missing.iter().map(|s| s.as_ref().to_owned()).collect(),
        }
    }
}

impl From<AuthError> for AdminServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Signing(e) => Self::Internal(e.into()),
            _ => Self::InvalidToken,
        }
    }
}

impl IntoResponse for AdminServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::RoleNotFound
            | Self::PermissionNotFound
            | Self::MenuNotFound => StatusCode::NOT_FOUND,
            Self::UsernameExists
            | Self::RoleCodeExists
            | Self::PermissionCodeExists
            | Self::MenuNameExists
            | Self::ContactExists => StatusCode::CONFLICT,
            Self::ProtectedRole
            | Self::CannotDeleteSelf
            | Self::InvalidParent
            | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidToken | Self::UserDisabled => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden { .. } | Self::SuperAdminRequired => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(status, self.kind(), self.to_string())
    }
}
