use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use yiya_domain::pagination::{Page, PageRequest};
use yiya_domain::permission::codes;
use yiya_domain::status::Status;

use crate::domain::types::AdminUser;
use crate::error::AdminServiceError;
use crate::handlers::current_user::CurrentUser;
use crate::handlers::guard::{require_perm, require_super_admin};
use crate::state::AppState;
use crate::usecase::user::{
    AssignRolesUseCase, CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase,
    ListUsersInput, ListUsersUseCase, ResetPasswordUseCase, UpdateUserInput, UpdateUserUseCase,
};

/// Account as returned by the user endpoints. Never carries the password hash.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub status: Status,
    #[serde(serialize_with = "yiya_core::serde::to_rfc3339_ms_opt")]
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_login_ip: Option<String>,
    #[serde(serialize_with = "yiya_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "yiya_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<AdminUser> for UserResponse {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            real_name: user.real_name,
            phone: user.phone,
            email: user.email,
            avatar: user.avatar,
            status: user.status,
            last_login_at: user.last_login_at,
            last_login_ip: user.last_login_ip,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /users ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    pub username: Option<String>,
    pub real_name: Option<String>,
}

fn default_page() -> u32 {
    PageRequest::default().page
}

fn default_size() -> u32 {
    PageRequest::default().size
}

pub async fn list_users(
    current: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Page<UserResponse>>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::USER_LIST)?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let page = usecase
        .execute(ListUsersInput {
            page: PageRequest {
                page: query.page,
                size: query.size,
            },
            username: query.username,
            real_name: query.real_name,
        })
        .await?;
    Ok(Json(page.map(UserResponse::from)))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default = "enabled")]
    pub status: i32,
}

fn enabled() -> i32 {
    Status::Enabled.as_i32()
}

pub async fn create_user(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::USER_CREATE)?;
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(CreateUserInput {
            username: body.username,
            password: body.password,
            real_name: body.real_name,
            phone: body.phone,
            email: body.email,
            status: body.status,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::USER_DETAIL)?;
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /users/{id} ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<i32>,
}

pub async fn update_user(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::USER_UPDATE)?;
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            id,
            UpdateUserInput {
                real_name: body.real_name,
                phone: body.phone,
                email: body.email,
                status: body.status,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::USER_DELETE)?;
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(current.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /users/{id}/reset-password ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

pub async fn reset_password(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::USER_RESET)?;
    let usecase = ResetPasswordUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(id, &body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /users/{id}/roles ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AssignRolesRequest {
    pub role_ids: Vec<i64>,
}

#[derive(Serialize)]
pub struct AssignRolesResponse {
    pub role_ids: Vec<i64>,
}

pub async fn assign_roles(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AssignRolesRequest>,
) -> Result<Json<AssignRolesResponse>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::USER_ASSIGN_ROLE)?;
    let usecase = AssignRolesUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    // Only a super-admin may hand out the super-admin role.
    if usecase
        .grants_role_code(&body.role_ids, state.evaluator.super_admin_code())
        .await?
    {
        require_super_admin(&state.evaluator, &current.user)?;
    }
    let role_ids = usecase.execute(id, &body.role_ids).await?;
    Ok(Json(AssignRolesResponse { role_ids }))
}
