use crate::domain::access::AccessEvaluator;
use crate::domain::repository::{MenuRepository, PermissionRepository, RoleRepository};
use crate::domain::types::{MenuNode, NewRole, Permission, Role, RolePatch, dedup_ids};
use crate::error::AdminServiceError;
use crate::usecase::{parse_status, require_text};

async fn load_role<R: RoleRepository>(repo: &R, id: i64) -> Result<Role, AdminServiceError> {
    repo.find_by_id(id)
        .await?
        .ok_or(AdminServiceError::RoleNotFound)
}

/// Keep the requested ids that `existing` confirms, in request order.
fn retain_existing(requested: Vec<i64>, existing: &[i64]) -> Vec<i64> {
    requested
        .into_iter()
        .filter(|id| existing.contains(id))
        .collect()
}

// ── ListRoles ────────────────────────────────────────────────────────────────

pub struct ListRolesUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> ListRolesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Role>, AdminServiceError> {
        self.repo.list().await
    }
}

// ── CreateRole ───────────────────────────────────────────────────────────────

pub struct CreateRoleInput {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub status: i32,
}

pub struct CreateRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> CreateRoleUseCase<R> {
    pub async fn execute(&self, input: CreateRoleInput) -> Result<Role, AdminServiceError> {
        require_text("name", &input.name, 50)?;
        require_text("code", &input.code, 50)?;
        let status = parse_status(input.status)?;
        if self.repo.code_taken(&input.code).await? {
            return Err(AdminServiceError::RoleCodeExists);
        }
        self.repo
            .create(&NewRole {
                name: input.name,
                code: input.code,
                description: input.description,
                status,
            })
            .await
    }
}

// ── GetRole ──────────────────────────────────────────────────────────────────

pub struct GetRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> GetRoleUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<Role, AdminServiceError> {
        load_role(&self.repo, id).await
    }
}

// ── UpdateRole ───────────────────────────────────────────────────────────────

pub struct UpdateRoleInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<i32>,
}

pub struct UpdateRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> UpdateRoleUseCase<R> {
    pub async fn execute(
        &self,
        id: i64,
        input: UpdateRoleInput,
    ) -> Result<Role, AdminServiceError> {
        if let Some(ref name) = input.name {
            require_text("name", name, 50)?;
        }
        let patch = RolePatch {
            name: input.name,
            description: input.description,
            status: input.status.map(parse_status).transpose()?,
        };
        load_role(&self.repo, id).await?;
        self.repo.update(id, &patch).await
    }
}

// ── DeleteRole ───────────────────────────────────────────────────────────────

/// The role carrying the evaluator's super-admin code cannot be deleted.
pub struct DeleteRoleUseCase<R: RoleRepository> {
    pub repo: R,
    pub evaluator: AccessEvaluator,
}

impl<R: RoleRepository> DeleteRoleUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<(), AdminServiceError> {
        let role = load_role(&self.repo, id).await?;
        if role.code == self.evaluator.super_admin_code() {
            return Err(AdminServiceError::ProtectedRole);
        }
        self.repo.soft_delete(id).await
    }
}

// ── Role permissions ─────────────────────────────────────────────────────────

pub struct GetRolePermissionsUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> GetRolePermissionsUseCase<R> {
    pub async fn execute(&self, role_id: i64) -> Result<Vec<Permission>, AdminServiceError> {
        load_role(&self.repo, role_id).await?;
        self.repo.permissions(role_id).await
    }
}

pub struct AssignPermissionsUseCase<R: RoleRepository, P: PermissionRepository> {
    pub roles: R,
    pub permissions: P,
}

impl<R: RoleRepository, P: PermissionRepository> AssignPermissionsUseCase<R, P> {
    /// Replace the role's permissions. Unknown or deleted permission ids are
    /// dropped. Returns the ids actually assigned.
    pub async fn execute(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> Result<Vec<i64>, AdminServiceError> {
        load_role(&self.roles, role_id).await?;
        let requested = dedup_ids(permission_ids);
        let existing = self.permissions.existing_ids(&requested).await?;
        let assigned = retain_existing(requested, &existing);
        self.roles.replace_permissions(role_id, &assigned).await?;
        tracing::info!(role_id, count = assigned.len(), "role permissions replaced");
        Ok(assigned)
    }
}

// ── Role menus ───────────────────────────────────────────────────────────────

pub struct GetRoleMenusUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> GetRoleMenusUseCase<R> {
    pub async fn execute(&self, role_id: i64) -> Result<Vec<MenuNode>, AdminServiceError> {
        load_role(&self.repo, role_id).await?;
        self.repo.menus(role_id).await
    }
}

pub struct AssignMenusUseCase<R: RoleRepository, M: MenuRepository> {
    pub roles: R,
    pub menus: M,
}

impl<R: RoleRepository, M: MenuRepository> AssignMenusUseCase<R, M> {
    /// Replace the role's menus. Unknown or deleted menu ids are dropped.
    pub async fn execute(
        &self,
        role_id: i64,
        menu_ids: &[i64],
    ) -> Result<Vec<i64>, AdminServiceError> {
        load_role(&self.roles, role_id).await?;
        let requested = dedup_ids(menu_ids);
        let existing = self.menus.existing_ids(&requested).await?;
        let assigned = retain_existing(requested, &existing);
        self.roles.replace_menus(role_id, &assigned).await?;
        tracing::info!(role_id, count = assigned.len(), "role menus replaced");
        Ok(assigned)
    }
}
