use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use yiya_domain::permission::codes;
use yiya_domain::status::Status;

use crate::domain::types::Role;
use crate::error::AdminServiceError;
use crate::handlers::current_user::CurrentUser;
use crate::handlers::guard::{require_all_perms, require_any_perm, require_perm};
use crate::handlers::menu::MenuResponse;
use crate::handlers::permission::PermissionResponse;
use crate::state::AppState;
use crate::usecase::role::{
    AssignMenusUseCase, AssignPermissionsUseCase, CreateRoleInput, CreateRoleUseCase,
    DeleteRoleUseCase, GetRoleMenusUseCase, GetRolePermissionsUseCase, GetRoleUseCase,
    ListRolesUseCase, UpdateRoleInput, UpdateRoleUseCase,
};

#[derive(Serialize)]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub status: Status,
    #[serde(serialize_with = "yiya_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "yiya_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            code: role.code,
            description: role.description,
            status: role.status,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

// ── GET /roles ───────────────────────────────────────────────────────────────

pub async fn list_roles(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RoleResponse>>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::ROLE_LIST)?;
    let usecase = ListRolesUseCase {
        repo: state.role_repo(),
    };
    let roles = usecase.execute().await?;
    Ok(Json(roles.into_iter().map(Into::into).collect()))
}

// ── POST /roles ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    #[serde(default = "enabled")]
    pub status: i32,
}

fn enabled() -> i32 {
    Status::Enabled.as_i32()
}

pub async fn create_role(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<RoleResponse>), AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::ROLE_CREATE)?;
    let usecase = CreateRoleUseCase {
        repo: state.role_repo(),
    };
    let role = usecase
        .execute(CreateRoleInput {
            name: body.name,
            code: body.code,
            description: body.description,
            status: body.status,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(role.into())))
}

// ── GET /roles/{id} ──────────────────────────────────────────────────────────

pub async fn get_role(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RoleResponse>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::ROLE_DETAIL)?;
    let usecase = GetRoleUseCase {
        repo: state.role_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /roles/{id} ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<i32>,
}

pub async fn update_role(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<RoleResponse>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::ROLE_UPDATE)?;
    let usecase = UpdateRoleUseCase {
        repo: state.role_repo(),
    };
    let role = usecase
        .execute(
            id,
            UpdateRoleInput {
                name: body.name,
                description: body.description,
                status: body.status,
            },
        )
        .await?;
    Ok(Json(role.into()))
}

// ── DELETE /roles/{id} ───────────────────────────────────────────────────────

pub async fn delete_role(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::ROLE_DELETE)?;
    let usecase = DeleteRoleUseCase {
        repo: state.role_repo(),
        evaluator: state.evaluator.clone(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /roles/{id}/permissions ──────────────────────────────────────────────

pub async fn get_role_permissions(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<PermissionResponse>>, AdminServiceError> {
    require_any_perm(
        &state.evaluator,
        &current.user,
        &[codes::ROLE_DETAIL, codes::ROLE_ASSIGN_PERMISSION],
    )?;
    let usecase = GetRolePermissionsUseCase {
        repo: state.role_repo(),
    };
    let permissions = usecase.execute(id).await?;
    Ok(Json(permissions.into_iter().map(Into::into).collect()))
}

// ── POST /roles/{id}/permissions ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AssignPermissionsRequest {
    pub permission_ids: Vec<i64>,
}

#[derive(Serialize)]
pub struct AssignPermissionsResponse {
    pub permission_ids: Vec<i64>,
}

pub async fn assign_permissions(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AssignPermissionsRequest>,
) -> Result<Json<AssignPermissionsResponse>, AdminServiceError> {
    require_all_perms(
        &state.evaluator,
        &current.user,
        &[codes::ROLE_ASSIGN_PERMISSION, codes::PERMISSION_LIST],
    )?;
    let usecase = AssignPermissionsUseCase {
        roles: state.role_repo(),
        permissions: state.permission_repo(),
    };
    let permission_ids = usecase.execute(id, &body.permission_ids).await?;
    Ok(Json(AssignPermissionsResponse { permission_ids }))
}

// ── GET /roles/{id}/menus ────────────────────────────────────────────────────

pub async fn get_role_menus(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MenuResponse>>, AdminServiceError> {
    require_any_perm(
        &state.evaluator,
        &current.user,
        &[codes::ROLE_DETAIL, codes::ROLE_ASSIGN_MENU],
    )?;
    let usecase = GetRoleMenusUseCase {
        repo: state.role_repo(),
    };
    let menus = usecase.execute(id).await?;
    Ok(Json(menus.into_iter().map(Into::into).collect()))
}

// ── POST /roles/{id}/menus ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AssignMenusRequest {
    pub menu_ids: Vec<i64>,
}

#[derive(Serialize)]
pub struct AssignMenusResponse {
    pub menu_ids: Vec<i64>,
}

pub async fn assign_menus(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AssignMenusRequest>,
) -> Result<Json<AssignMenusResponse>, AdminServiceError> {
    require_all_perms(
        &state.evaluator,
        &current.user,
        &[codes::ROLE_ASSIGN_MENU, codes::MENU_LIST],
    )?;
    let usecase = AssignMenusUseCase {
        roles: state.role_repo(),
        menus: state.menu_repo(),
    };
    let menu_ids = usecase.execute(id, &body.menu_ids).await?;
    Ok(Json(AssignMenusResponse { menu_ids }))
}
