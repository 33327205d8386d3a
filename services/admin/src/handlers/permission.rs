use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use yiya_domain::permission::{PermissionKind, codes};

use crate::domain::types::Permission;
use crate::error::AdminServiceError;
use crate::handlers::current_user::CurrentUser;
use crate::handlers::guard::require_perm;
use crate::state::AppState;
use crate::usecase::permission::{
    CreatePermissionInput, CreatePermissionUseCase, DeletePermissionUseCase,
    GetPermissionUseCase, ListPermissionsUseCase, UpdatePermissionInput,
    UpdatePermissionUseCase,
};

#[derive(Serialize)]
pub struct PermissionResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: PermissionKind,
    pub description: Option<String>,
    #[serde(serialize_with = "yiya_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "yiya_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Permission> for PermissionResponse {
    fn from(p: Permission) -> Self {
        Self {
            id: p.id,
            name: p.name,
            code: p.code,
            kind: p.kind,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// ── GET /permissions ─────────────────────────────────────────────────────────

pub async fn list_permissions(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<PermissionResponse>>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::PERMISSION_LIST)?;
    let usecase = ListPermissionsUseCase {
        repo: state.permission_repo(),
    };
    let permissions = usecase.execute().await?;
    Ok(Json(permissions.into_iter().map(Into::into).collect()))
}

// ── GET /permissions/tree ────────────────────────────────────────────────────

/// Slim entry for the role-binding picker.
#[derive(Serialize)]
pub struct PermissionOption {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: PermissionKind,
}

pub async fn permission_options(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<PermissionOption>>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::PERMISSION_LIST)?;
    let usecase = ListPermissionsUseCase {
        repo: state.permission_repo(),
    };
    let options = usecase
        .execute()
        .await?
        .into_iter()
        .map(|p| PermissionOption {
            id: p.id,
            name: p.name,
            code: p.code,
            kind: p.kind,
        })
        .collect();
    Ok(Json(options))
}

// ── POST /permissions ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePermissionRequest {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
}

pub async fn create_permission(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreatePermissionRequest>,
) -> Result<(StatusCode, Json<PermissionResponse>), AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::PERMISSION_CREATE)?;
    let usecase = CreatePermissionUseCase {
        repo: state.permission_repo(),
    };
    let permission = usecase
        .execute(CreatePermissionInput {
            name: body.name,
            code: body.code,
            kind: body.kind,
            description: body.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(permission.into())))
}

// ── GET /permissions/{id} ────────────────────────────────────────────────────

pub async fn get_permission(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PermissionResponse>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::PERMISSION_DETAIL)?;
    let usecase = GetPermissionUseCase {
        repo: state.permission_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /permissions/{id} ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePermissionRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
}

pub async fn update_permission(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdatePermissionRequest>,
) -> Result<Json<PermissionResponse>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::PERMISSION_UPDATE)?;
    let usecase = UpdatePermissionUseCase {
        repo: state.permission_repo(),
    };
    let permission = usecase
        .execute(
            id,
            UpdatePermissionInput {
                name: body.name,
                kind: body.kind,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(permission.into()))
}

// ── DELETE /permissions/{id} ─────────────────────────────────────────────────

pub async fn delete_permission(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::PERMISSION_DELETE)?;
    let usecase = DeletePermissionUseCase {
        repo: state.permission_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
