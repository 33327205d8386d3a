#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use yiya_domain::pagination::PageRequest;

use crate::domain::types::{
    AdminUser, MenuNode, MenuPatch, NewMenu, NewPermission, NewRole, NewUser, Permission,
    PermissionPatch, ResolvedUser, Role, RolePatch, UserFilter, UserPatch,
};
use crate::error::AdminServiceError;

// Every read excludes soft-deleted rows unless the method says otherwise.

/// Repository for back-office accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<AdminUser>, AdminServiceError>;

    async fn find_by_username(&self, username: &str)
    -> Result<Option<AdminUser>, AdminServiceError>;

    /// True if any row, deleted or not, holds `username`.
    async fn username_taken(&self, username: &str) -> Result<bool, AdminServiceError>;

    /// One page ordered by id descending, plus the total match count.
    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<(Vec<AdminUser>, u64), AdminServiceError>;

    async fn create(&self, user: &NewUser) -> Result<AdminUser, AdminServiceError>;

    async fn update(&self, id: i64, patch: &UserPatch) -> Result<AdminUser, AdminServiceError>;

    async fn update_password(&self, id: i64, password_hash: &str)
    -> Result<(), AdminServiceError>;

    async fn record_login(
        &self,
        id: i64,
        at: DateTime<Utc>,
        ip: Option<&str>,
    ) -> Result<(), AdminServiceError>;

    async fn soft_delete(&self, id: i64) -> Result<(), AdminServiceError>;

    /// Replace the user's role set in one transaction.
    async fn replace_roles(&self, user_id: i64, role_ids: &[i64]) -> Result<(), AdminServiceError>;

    /// Load the user with non-deleted roles, their non-deleted permissions and
    /// their menu ids.
    async fn resolve(&self, id: i64) -> Result<Option<ResolvedUser>, AdminServiceError>;
}

/// Repository for roles and their grants.
pub trait RoleRepository: Send + Sync {
    /// All roles ordered by id.
    async fn list(&self) -> Result<Vec<Role>, AdminServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, AdminServiceError>;

    /// True if any row, deleted or not, holds `code`.
    async fn code_taken(&self, code: &str) -> Result<bool, AdminServiceError>;

    async fn create(&self, role: &NewRole) -> Result<Role, AdminServiceError>;

    async fn update(&self, id: i64, patch: &RolePatch) -> Result<Role, AdminServiceError>;

    async fn soft_delete(&self, id: i64) -> Result<(), AdminServiceError>;

    /// Subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AdminServiceError>;

    async fn permissions(&self, role_id: i64) -> Result<Vec<Permission>, AdminServiceError>;

    async fn menus(&self, role_id: i64) -> Result<Vec<MenuNode>, AdminServiceError>;

    /// Replace the role's permission set in one transaction.
    async fn replace_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> Result<(), AdminServiceError>;

    /// Replace the role's menu set in one transaction.
    async fn replace_menus(&self, role_id: i64, menu_ids: &[i64]) -> Result<(), AdminServiceError>;
}

/// Repository for the permission catalog.
pub trait PermissionRepository: Send + Sync {
    /// All permissions ordered by id.
    async fn list(&self) -> Result<Vec<Permission>, AdminServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Permission>, AdminServiceError>;

    /// True if any row, deleted or not, holds `code`.
    async fn code_taken(&self, code: &str) -> Result<bool, AdminServiceError>;

    async fn create(&self, permission: &NewPermission) -> Result<Permission, AdminServiceError>;

    async fn update(
        &self,
        id: i64,
        patch: &PermissionPatch,
    ) -> Result<Permission, AdminServiceError>;

    async fn soft_delete(&self, id: i64) -> Result<(), AdminServiceError>;

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AdminServiceError>;
}

/// Repository for menu nodes.
pub trait MenuRepository: Send + Sync {
    /// Menus ordered by `(sort, id)`; disabled ones only when asked.
    async fn list(&self, include_disabled: bool) -> Result<Vec<MenuNode>, AdminServiceError>;

    /// Enabled menus among `ids`, ordered by `(sort, id)`.
    async fn list_enabled_by_ids(&self, ids: &[i64]) -> Result<Vec<MenuNode>, AdminServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<MenuNode>, AdminServiceError>;

    /// True if any row other than `exclude_id`, deleted or not, holds `name`.
    async fn name_taken(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AdminServiceError>;

    /// `(id, parent_id)` of every menu.
    async fn edges(&self) -> Result<Vec<(i64, i64)>, AdminServiceError>;

    async fn create(&self, menu: &NewMenu) -> Result<MenuNode, AdminServiceError>;

    async fn update(&self, id: i64, patch: &MenuPatch) -> Result<MenuNode, AdminServiceError>;

    /// Soft-delete `id` and all of its descendants in one transaction.
    /// Returns the deleted ids.
    async fn delete_subtree(&self, id: i64) -> Result<Vec<i64>, AdminServiceError>;

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AdminServiceError>;
}

/// Refresh-token allow list and revoked-token deny list.
pub trait TokenStore: Send + Sync {
    async fn store_refresh(
        &self,
        user_id: i64,
        token: &str,
        ttl_secs: u64,
    ) -> Result<(), AdminServiceError>;

    async fn refresh_exists(&self, user_id: i64, token: &str) -> Result<bool, AdminServiceError>;

    async fn remove_refresh(&self, user_id: i64, token: &str) -> Result<(), AdminServiceError>;

    async fn blacklist(&self, token: &str, ttl_secs: u64) -> Result<(), AdminServiceError>;

    async fn is_blacklisted(&self, token: &str) -> Result<bool, AdminServiceError>;
}
