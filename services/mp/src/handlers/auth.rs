use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use yiya_auth_types::token::BEARER;

use crate::error::MpServiceError;
use crate::handlers::current_user::CurrentMpUser;
use crate::state::AppState;
use crate::usecase::auth::{BindPhoneUseCase, LoginByCodeUseCase};

// ── POST /auth/login_by_code ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginByCodeRequest {
    pub code: String,
}

#[derive(Serialize)]
pub struct LoginByCodeResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub is_new_user: bool,
    pub need_bind_phone: bool,
}

pub async fn login_by_code(
    State(state): State<AppState>,
    Json(body): Json<LoginByCodeRequest>,
) -> Result<Json<LoginByCodeResponse>, MpServiceError> {
    let usecase = LoginByCodeUseCase {
        users: state.user_repo(),
        wechat: state.wechat.clone(),
        issuer: state.issuer.clone(),
    };
    let out = usecase.execute(&body.code).await?;
    Ok(Json(LoginByCodeResponse {
        access_token: out.access_token,
        refresh_token: out.refresh_token,
        token_type: BEARER,
        expires_in: out.expires_in,
        is_new_user: out.is_new_user,
        need_bind_phone: out.need_bind_phone,
    }))
}

// ── POST /auth/bind_phone ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BindPhoneRequest {
    pub code: String,
}

#[derive(Serialize)]
pub struct BindPhoneResponse {
    pub phone: String,
}

pub async fn bind_phone(
    State(state): State<AppState>,
    CurrentMpUser(user): CurrentMpUser,
    Json(body): Json<BindPhoneRequest>,
) -> Result<Json<BindPhoneResponse>, MpServiceError> {
    let usecase = BindPhoneUseCase {
        users: state.user_repo(),
        wechat: state.wechat.clone(),
    };
    let phone = usecase.execute(user.id, &body.code).await?;
    Ok(Json(BindPhoneResponse { phone }))
}
