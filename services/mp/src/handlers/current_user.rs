use axum::extract::FromRequestParts;
use http::request::Parts;

use yiya_auth_types::bearer::BearerToken;

use crate::domain::types::MpUser;
use crate::error::MpServiceError;
use crate::state::AppState;
use crate::usecase::auth::ResolveMpUserUseCase;

/// The mini-program user behind the request's bearer token.
///
/// Rejects with `InvalidToken` (401) unless the header carries a valid `mp`
/// access token whose account still exists.
#[derive(Debug, Clone)]
pub struct CurrentMpUser(pub MpUser);

impl FromRequestParts<AppState> for CurrentMpUser {
    type Rejection = MpServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = BearerToken::from_parts(parts).ok_or(MpServiceError::InvalidToken)?;
        let usecase = ResolveMpUserUseCase {
            users: state.user_repo(),
            issuer: state.issuer.clone(),
        };
        Ok(Self(usecase.execute(token.as_str()).await?))
    }
}
