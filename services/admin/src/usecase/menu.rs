use yiya_domain::status::validate_flag;

use crate::domain::access::AccessEvaluator;
use crate::domain::menu_tree::{build_tree, to_route_tree, would_create_cycle};
use crate::domain::repository::MenuRepository;
use crate::domain::types::{
    MenuNode, MenuPatch, MenuRoute, MenuTreeNode, NewMenu, ROOT_PARENT_ID, ResolvedUser,
};
use crate::error::AdminServiceError;
use crate::usecase::{parse_status, require_text};

fn flag(field: &str, value: i32) -> Result<i32, AdminServiceError> {
    validate_flag(value).map_err(|e| AdminServiceError::invalid_input(format!("{field}: {e}")))
}

async fn load_menu<R: MenuRepository>(repo: &R, id: i64) -> Result<MenuNode, AdminServiceError> {
    repo.find_by_id(id)
        .await?
        .ok_or(AdminServiceError::MenuNotFound)
}

/// `parent_id` must be the root marker or a live menu.
async fn check_parent_exists<R: MenuRepository>(
    repo: &R,
    parent_id: i64,
) -> Result<(), AdminServiceError> {
    if parent_id == ROOT_PARENT_ID {
        return Ok(());
    }
    match repo.find_by_id(parent_id).await? {
        Some(_) => Ok(()),
        None => Err(AdminServiceError::InvalidParent),
    }
}

// ── GetMenuTree ──────────────────────────────────────────────────────────────

pub struct GetMenuTreeUseCase<R: MenuRepository> {
    pub repo: R,
}

impl<R: MenuRepository> GetMenuTreeUseCase<R> {
    pub async fn execute(
        &self,
        include_disabled: bool,
    ) -> Result<Vec<MenuTreeNode>, AdminServiceError> {
        let menus = self.repo.list(include_disabled).await?;
        Ok(build_tree(&menus, ROOT_PARENT_ID))
    }
}

// ── GetMyMenuTree ────────────────────────────────────────────────────────────

pub struct GetMyMenuTreeUseCase<R: MenuRepository> {
    pub repo: R,
    pub evaluator: AccessEvaluator,
}

impl<R: MenuRepository> GetMyMenuTreeUseCase<R> {
    /// Routes visible to `user`: every enabled menu for a super-admin,
    /// otherwise the enabled menus granted through any role.
    pub async fn execute(&self, user: &ResolvedUser) -> Result<Vec<MenuRoute>, AdminServiceError> {
        let menus = if self.evaluator.is_super_admin(user) {
            self.repo.list(false).await?
        } else {
            let ids = user.menu_ids();
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            self.repo.list_enabled_by_ids(&ids).await?
        };
        Ok(to_route_tree(&build_tree(&menus, ROOT_PARENT_ID)))
    }
}

// ── CreateMenu ───────────────────────────────────────────────────────────────

pub struct CreateMenuInput {
    pub parent_id: i64,
    pub title: String,
    pub name: String,
    pub path: Option<String>,
    pub component: Option<String>,
    pub icon: Option<String>,
    pub sort: i32,
    pub hidden: i32,
    pub keep_alive: i32,
    pub status: i32,
}

pub struct CreateMenuUseCase<R: MenuRepository> {
    pub repo: R,
}

impl<R: MenuRepository> CreateMenuUseCase<R> {
    pub async fn execute(&self, input: CreateMenuInput) -> Result<MenuNode, AdminServiceError> {
        require_text("title", &input.title, 50)?;
        require_text("name", &input.name, 50)?;
        let menu = NewMenu {
            parent_id: input.parent_id,
            title: input.title,
            name: input.name,
            path: input.path,
            component: input.component,
            icon: input.icon,
            sort: input.sort,
            hidden: flag("hidden", input.hidden)?,
            keep_alive: flag("keep_alive", input.keep_alive)?,
            status: parse_status(input.status)?,
        };

        if self.repo.name_taken(&menu.name, None).await? {
            return Err(AdminServiceError::MenuNameExists);
        }
        check_parent_exists(&self.repo, menu.parent_id).await?;

        self.repo.create(&menu).await
    }
}

// ── UpdateMenu ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateMenuInput {
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

pub struct UpdateMenuUseCase<R: MenuRepository> {
    pub repo: R,
}

impl<R: MenuRepository> UpdateMenuUseCase<R> {
    pub async fn execute(
        &self,
        id: i64,
        input: UpdateMenuInput,
    ) -> Result<MenuNode, AdminServiceError> {
        if let Some(ref title) = input.title {
            require_text("title", title, 50)?;
        }
        if let Some(ref name) = input.name {
            require_text("name", name, 50)?;
        }
        let patch = MenuPatch {
            parent_id: input.parent_id,
            title: input.title,
            name: input.name,
            path: input.path,
            component: input.component,
            icon: input.icon,
            sort: input.sort,
            hidden: input.hidden.map(|v| flag("hidden", v)).transpose()?,
            keep_alive: input.keep_alive.map(|v| flag("keep_alive", v)).transpose()?,
            status: input.status.map(parse_status).transpose()?,
        };

        let current = load_menu(&self.repo, id).await?;

        if let Some(ref name) = patch.name {
            if *name != current.name && self.repo.name_taken(name, Some(id)).await? {
                return Err(AdminServiceError::MenuNameExists);
            }
        }

        if let Some(parent_id) = patch.parent_id {
            if parent_id != current.parent_id {
                check_parent_exists(&self.repo, parent_id).await?;
                let edges = self.repo.edges().await?;
                if would_create_cycle(&edges, id, parent_id) {
                    return Err(AdminServiceError::InvalidParent);
                }
            }
        }

        self.repo.update(id, &patch).await
    }
}

// ── UpdateMenuSort ───────────────────────────────────────────────────────────

pub struct UpdateMenuSortUseCase<R: MenuRepository> {
    pub repo: R,
}

impl<R: MenuRepository> UpdateMenuSortUseCase<R> {
    pub async fn execute(&self, id: i64, sort: i32) -> Result<MenuNode, AdminServiceError> {
        if sort < 0 {
            return Err(AdminServiceError::invalid_input("sort must be >= 0"));
        }
        load_menu(&self.repo, id).await?;
        self.repo
            .update(
                id,
                &MenuPatch {
                    sort: Some(sort),
                    ..Default::default()
                },
            )
            .await
    }
}

// ── DeleteMenu ───────────────────────────────────────────────────────────────

pub struct DeleteMenuUseCase<R: MenuRepository> {
    pub repo: R,
}

impl<R: MenuRepository> DeleteMenuUseCase<R> {
    /// Soft-delete the menu and its whole subtree. Returns the deleted ids.
    pub async fn execute(&self, id: i64) -> Result<Vec<i64>, AdminServiceError> {
        load_menu(&self.repo, id).await?;
        let deleted = self.repo.delete_subtree(id).await?;
        tracing::info!(menu_id = id, count = deleted.len(), "menu subtree deleted");
        Ok(deleted)
    }
}
