use axum::extract::FromRequestParts;
use http::request::Parts;

use yiya_auth_types::bearer::BearerToken;

use crate::domain::types::ResolvedUser;
use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::auth::ResolveUserUseCase;

/// The authenticated admin behind the request's bearer token, with roles,
/// permission codes and menu ids loaded.
///
/// Rejects with `InvalidToken` (401) when the header is missing, the token does
/// not validate as an access token, or the user no longer exists, and with
/// `UserDisabled` (401) when the account is disabled.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: ResolvedUser,
}

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AdminServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = BearerToken::from_parts(parts).ok_or(AdminServiceError::InvalidToken)?;
        let usecase = ResolveUserUseCase {
            users: state.user_repo(),
            issuer: state.issuer.clone(),
        };
        let user = usecase.execute(token.as_str()).await?;
        Ok(Self { user })
    }
}
