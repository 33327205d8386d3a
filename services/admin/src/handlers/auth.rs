use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts, State};
use axum::{Json, http::StatusCode};
use http::request::Parts;
use serde::{Deserialize, Serialize};

use yiya_auth_types::token::BEARER;
use yiya_domain::status::Status;

use crate::error::AdminServiceError;
use crate::handlers::current_user::CurrentUser;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase};
use crate::usecase::user::GetUserUseCase;

/// Best-effort client address: first `X-Forwarded-For` hop, then `X-Real-IP`,
/// then the socket peer when the server was started with connect info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl ClientIp {
    pub fn from_parts(parts: &Parts) -> Self {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };
        let ip = header("x-forwarded-for")
            .or_else(|| header("x-real-ip"))
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            });
        Self(ip)
    }
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let ip = Self::from_parts(parts);
        async move { Ok(ip) }
    }
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AdminServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        tokens: state.token_store(),
        issuer: state.issuer.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
            ip,
        })
        .await?;
    Ok(Json(LoginResponse {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        token_type: BEARER,
        expires_in: output.expires_in,
    }))
}

// ── POST /auth/refresh ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AdminServiceError> {
    let usecase = RefreshUseCase {
        tokens: state.token_store(),
        issuer: state.issuer.clone(),
    };
    let output = usecase.execute(&body.refresh_token).await?;
    Ok(Json(RefreshResponse {
        access_token: output.access_token,
        token_type: BEARER,
        expires_in: output.expires_in,
    }))
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

pub async fn logout(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<LogoutRequest>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = LogoutUseCase {
        tokens: state.token_store(),
        issuer: state.issuer.clone(),
    };
    usecase.execute(current.id(), &body.refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub status: Status,
    #[serde(serialize_with = "yiya_core::serde::to_rfc3339_ms_opt")]
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub is_super_admin: bool,
}

pub async fn me(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AdminServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(current.id()).await?;
    let evaluator = &state.evaluator;
    Ok(Json(MeResponse {
        id: user.id,
        username: user.username,
        real_name: user.real_name,
        phone: user.phone,
        email: user.email,
        avatar: user.avatar,
        status: user.status,
        last_login_at: user.last_login_at,
        roles: current.user.roles.iter().map(|r| r.code.clone()).collect(),
        permissions: evaluator
            .effective_permissions(&current.user)
            .into_iter()
            .map(str::to_owned)
            .collect(),
        is_super_admin: evaluator.is_super_admin(&current.user),
    }))
}
