use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use yiya_domain::permission::codes;
use yiya_domain::status::Status;

use crate::domain::types::{MenuNode, MenuRoute, MenuTreeNode};
use crate::error::AdminServiceError;
use crate::handlers::current_user::CurrentUser;
use crate::handlers::guard::require_perm;
use crate::state::AppState;
use crate::usecase::menu::{
    CreateMenuInput, CreateMenuUseCase, DeleteMenuUseCase, GetMenuTreeUseCase,
    GetMyMenuTreeUseCase, UpdateMenuInput, UpdateMenuSortUseCase, UpdateMenuUseCase,
};

/// Flat menu record.
#[derive(Serialize)]
pub struct MenuResponse {
    pub id: i64,
    pub parent_id: i64,
    pub title: String,
    pub name: String,
    pub path: Option<String>,
    pub component: Option<String>,
    pub icon: Option<String>,
    pub sort: i32,
    pub hidden: i32,
    pub keep_alive: i32,
    pub status: Status,
    #[serde(serialize_with = "yiya_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<MenuNode> for MenuResponse {
    fn from(m: MenuNode) -> Self {
        Self {
            id: m.id,
            parent_id: m.parent_id,
            title: m.title,
            name: m.name,
            path: m.path,
            component: m.component,
            icon: m.icon,
            sort: m.sort,
            hidden: m.hidden,
            keep_alive: m.keep_alive,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

// ── GET /menus/tree ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MenuTreeQuery {
    #[serde(default)]
    pub include_disabled: bool,
}

pub async fn get_menu_tree(
    current: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<MenuTreeQuery>,
) -> Result<Json<Vec<MenuTreeNode>>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::MENU_LIST)?;
    let usecase = GetMenuTreeUseCase {
        repo: state.menu_repo(),
    };
    Ok(Json(usecase.execute(query.include_disabled).await?))
}

// ── GET /menus/my ────────────────────────────────────────────────────────────

pub async fn get_my_menus(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuRoute>>, AdminServiceError> {
    let usecase = GetMyMenuTreeUseCase {
        repo: state.menu_repo(),
        evaluator: state.evaluator.clone(),
    };
    Ok(Json(usecase.execute(&current.user).await?))
}

// ── POST /menus ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateMenuRequest {
    #[serde(default)]
    pub parent_id: i64,
    pub title: String,
    pub name: String,
    pub path: Option<String>,
    pub component: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub hidden: i32,
    #[serde(default)]
    pub keep_alive: i32,
    #[serde(default = "enabled")]
    pub status: i32,
}

fn enabled() -> i32 {
    Status::Enabled.as_i32()
}

pub async fn create_menu(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateMenuRequest>,
) -> Result<(StatusCode, Json<MenuResponse>), AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::MENU_CREATE)?;
    let usecase = CreateMenuUseCase {
        repo: state.menu_repo(),
    };
    let menu = usecase
        .execute(CreateMenuInput {
            parent_id: body.parent_id,
            title: body.title,
            name: body.name,
            path: body.path,
            component: body.component,
            icon: body.icon,
            sort: body.sort,
            hidden: body.hidden,
            keep_alive: body.keep_alive,
            status: body.status,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(menu.into())))
}

// ── PUT /menus/{id} ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMenuRequest {
    pub parent_id: Option<i64>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub component: Option<String>,
    pub icon: Option<String>,
    pub sort: Option<i32>,
    pub hidden: Option<i32>,
    pub keep_alive: Option<i32>,
    pub status: Option<i32>,
}

pub async fn update_menu(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateMenuRequest>,
) -> Result<Json<MenuResponse>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::MENU_UPDATE)?;
    let usecase = UpdateMenuUseCase {
        repo: state.menu_repo(),
    };
    let menu = usecase
        .execute(
            id,
            UpdateMenuInput {
                parent_id: body.parent_id,
                title: body.title,
                name: body.name,
                path: body.path,
                component: body.component,
                icon: body.icon,
                sort: body.sort,
                hidden: body.hidden,
                keep_alive: body.keep_alive,
                status: body.status,
            },
        )
        .await?;
    Ok(Json(menu.into()))
}

// ── PUT /menus/{id}/sort ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMenuSortRequest {
    pub sort: i32,
}

pub async fn update_menu_sort(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateMenuSortRequest>,
) -> Result<Json<MenuResponse>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::MENU_UPDATE)?;
    let usecase = UpdateMenuSortUseCase {
        repo: state.menu_repo(),
    };
    Ok(Json(usecase.execute(id, body.sort).await?.into()))
}

// ── DELETE /menus/{id} ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteMenuResponse {
    pub deleted_ids: Vec<i64>,
}

pub async fn delete_menu(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteMenuResponse>, AdminServiceError> {
    require_perm(&state.evaluator, &current.user, codes::MENU_DELETE)?;
    let usecase = DeleteMenuUseCase {
        repo: state.menu_repo(),
    };
    let deleted_ids = usecase.execute(id).await?;
    Ok(Json(DeleteMenuResponse { deleted_ids }))
}
