use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{MpUser, MpUserPatch};
use crate::error::MpServiceError;
use crate::handlers::current_user::CurrentMpUser;
use crate::state::AppState;
use crate::usecase::user::UpdateMeUseCase;

/// Profile as shown to the mini-program. Session keys never leave the server.
#[derive(Serialize)]
pub struct MpUserResponse {
    pub id: i64,
    pub openid: String,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<i32>,
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    #[serde(serialize_with = "yiya_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<MpUser> for MpUserResponse {
    fn from(user: MpUser) -> Self {
        Self {
            id: user.id,
            openid: user.openid,
            nickname: user.nickname,
            avatar: user.avatar,
            phone: user.phone,
            gender: user.gender,
            country: user.country,
            province: user.province,
            city: user.city,
            created_at: user.created_at,
        }
    }
}

// ── GET /user/me ─────────────────────────────────────────────────────────────

pub async fn get_me(CurrentMpUser(user): CurrentMpUser) -> Json<MpUserResponse> {
    Json(user.into())
}

// ── PUT /user/me ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub nickname: Option<String>,
    pub avatar: Option<String>,
}

pub async fn update_me(
    State(state): State<AppState>,
    CurrentMpUser(user): CurrentMpUser,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<MpUserResponse>, MpServiceError> {
    let usecase = UpdateMeUseCase {
        users: state.user_repo(),
    };
    let patch = MpUserPatch {
        nickname: body.nickname,
        avatar: body.avatar,
    };
    let updated = usecase.execute(user.id, patch).await?;
    Ok(Json(updated.into()))
}
