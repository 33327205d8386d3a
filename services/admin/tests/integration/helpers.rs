#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use yiya_admin::domain::repository::{
    MenuRepository, PermissionRepository, RoleRepository, TokenStore, UserRepository,
};
use yiya_admin::domain::types::{
    AdminUser, MenuNode, MenuPatch, NewMenu, NewPermission, NewRole, NewUser, Permission,
    PermissionPatch, ResolvedRole, ResolvedUser, Role, RolePatch, UserFilter, UserPatch,
};
use yiya_admin::error::AdminServiceError;
use yiya_auth_types::password::hash_password;
use yiya_domain::pagination::PageRequest;
use yiya_domain::permission::PermissionKind;
use yiya_domain::status::Status;

pub use yiya_testing::auth::{TEST_JWT_SECRET, test_issuer};

// ── MemoryDb ─────────────────────────────────────────────────────────────────

/// Rows of every admin table. Deleted rows stay in place with `deleted`
/// set, mirroring the soft-delete columns.
#[derive(Default)]
pub struct Tables {
    pub users: Vec<(AdminUser, bool)>,
    pub roles: Vec<(Role, bool)>,
    pub permissions: Vec<(Permission, bool)>,
    pub menus: Vec<(MenuNode, bool)>,
    pub user_roles: Vec<(i64, i64)>,
    pub role_permissions: Vec<(i64, i64)>,
    pub role_menus: Vec<(i64, i64)>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id + 1000
    }
}

/// Shared in-memory store behind every mock repository.
#[derive(Clone, Default)]
pub struct MemoryDb {
    pub tables: Arc<Mutex<Tables>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> MockUserRepo {
        MockUserRepo { db: self.clone() }
    }

    pub fn roles(&self) -> MockRoleRepo {
        MockRoleRepo { db: self.clone() }
    }

    pub fn permissions(&self) -> MockPermissionRepo {
        MockPermissionRepo { db: self.clone() }
    }

    pub fn menus(&self) -> MockMenuRepo {
        MockMenuRepo { db: self.clone() }
    }

    pub fn insert_user(&self, user: AdminUser) {
        self.tables.lock().unwrap().users.push((user, false));
    }

    pub fn insert_role(&self, role: Role) {
        self.tables.lock().unwrap().roles.push((role, false));
    }

    pub fn insert_permission(&self, permission: Permission) {
        self.tables
            .lock()
            .unwrap()
            .permissions
            .push((permission, false));
    }

    pub fn insert_menu(&self, menu: MenuNode) {
        self.tables.lock().unwrap().menus.push((menu, false));
    }

    pub fn link_user_role(&self, user_id: i64, role_id: i64) {
        self.tables
            .lock()
            .unwrap()
            .user_roles
            .push((user_id, role_id));
    }

    pub fn link_role_permission(&self, role_id: i64, permission_id: i64) {
        self.tables
            .lock()
            .unwrap()
            .role_permissions
            .push((role_id, permission_id));
    }

    pub fn link_role_menu(&self, role_id: i64, menu_id: i64) {
        self.tables
            .lock()
            .unwrap()
            .role_menus
            .push((role_id, menu_id));
    }

    pub fn deleted_menu_ids(&self) -> Vec<i64> {
        let tables = self.tables.lock().unwrap();
        let mut ids: Vec<i64> = tables
            .menus
            .iter()
            .filter(|(_, deleted)| *deleted)
            .map(|(m, _)| m.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

fn live<T: Clone>(rows: &[(T, bool)]) -> impl Iterator<Item = &T> {
    rows.iter().filter(|(_, deleted)| !deleted).map(|(row, _)| row)
}

fn ordered_menus<'a>(menus: impl Iterator<Item = &'a MenuNode>) -> Vec<MenuNode> {
    let mut out: Vec<MenuNode> = menus.cloned().collect();
    out.sort_by_key(|m| (m.sort, m.id));
    out
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub db: MemoryDb,
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: i64) -> Result<Option<AdminUser>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(live(&tables.users).find(|u| u.id == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(live(&tables.users).find(|u| u.username == username).cloned())
    }

    async fn username_taken(&self, username: &str) -> Result<bool, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(tables.users.iter().any(|(u, _)| u.username == username))
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<(Vec<AdminUser>, u64), AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        let contains = |value: Option<&String>, needle: &Option<String>| match needle {
            Some(n) => value.is_some_and(|v| v.contains(n.as_str())),
            None => true,
        };
        let mut matched: Vec<AdminUser> = live(&tables.users)
            .filter(|u| contains(Some(&u.username), &filter.username))
            .filter(|u| contains(u.real_name.as_ref(), &filter.real_name))
            .cloned()
            .collect();
        matched.sort_by_key(|u| std::cmp::Reverse(u.id));
        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect();
        Ok((items, total))
    }

    async fn create(&self, user: &NewUser) -> Result<AdminUser, AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        let now = Utc::now();
        let created = AdminUser {
            id: tables.next_id(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            real_name: user.real_name.clone(),
            phone: user.phone.clone(),
            email: user.email.clone(),
            avatar: None,
            status: user.status,
            last_login_at: None,
            last_login_ip: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push((created.clone(), false));
        Ok(created)
    }

    async fn update(&self, id: i64, patch: &UserPatch) -> Result<AdminUser, AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        let (user, _) = tables
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(AdminServiceError::UserNotFound)?;
        if let Some(ref v) = patch.real_name {
            user.real_name = Some(v.clone());
        }
        if let Some(ref v) = patch.phone {
            user.phone = Some(v.clone());
        }
        if let Some(ref v) = patch.email {
            user.email = Some(v.clone());
        }
        if let Some(v) = patch.status {
            user.status = v;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_password(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<(), AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        if let Some((user, _)) = tables.users.iter_mut().find(|(u, _)| u.id == id) {
            user.password_hash = password_hash.to_owned();
        }
        Ok(())
    }

    async fn record_login(
        &self,
        id: i64,
        at: DateTime<Utc>,
        ip: Option<&str>,
    ) -> Result<(), AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        if let Some((user, _)) = tables.users.iter_mut().find(|(u, _)| u.id == id) {
            user.last_login_at = Some(at);
            user.last_login_ip = ip.map(str::to_owned);
        }
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        if let Some((_, deleted)) = tables.users.iter_mut().find(|(u, _)| u.id == id) {
            *deleted = true;
        }
        Ok(())
    }

    async fn replace_roles(&self, user_id: i64, role_ids: &[i64]) -> Result<(), AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        tables.user_roles.retain(|(u, _)| *u != user_id);
        tables
            .user_roles
            .extend(role_ids.iter().map(|r| (user_id, *r)));
        Ok(())
    }

    async fn resolve(&self, id: i64) -> Result<Option<ResolvedUser>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        let Some(user) = live(&tables.users).find(|u| u.id == id) else {
            return Ok(None);
        };
        let role_ids: Vec<i64> = tables
            .user_roles
            .iter()
            .filter(|(u, _)| *u == id)
            .map(|(_, r)| *r)
            .collect();
        let roles = live(&tables.roles)
            .filter(|r| role_ids.contains(&r.id))
            .map(|r| ResolvedRole {
                id: r.id,
                code: r.code.clone(),
                status: r.status,
                permissions: tables
                    .role_permissions
                    .iter()
                    .filter(|(role, _)| *role == r.id)
                    .filter_map(|(_, p)| live(&tables.permissions).find(|perm| perm.id == *p))
                    .map(|p| p.code.clone())
                    .collect(),
                menu_ids: tables
                    .role_menus
                    .iter()
                    .filter(|(role, _)| *role == r.id)
                    .map(|(_, m)| *m)
                    .collect(),
            })
            .collect();
        Ok(Some(ResolvedUser {
            id: user.id,
            username: user.username.clone(),
            status: user.status,
            roles,
        }))
    }
}

// ── MockRoleRepo ─────────────────────────────────────────────────────────────

pub struct MockRoleRepo {
    pub db: MemoryDb,
}

impl RoleRepository for MockRoleRepo {
    async fn list(&self) -> Result<Vec<Role>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        let mut roles: Vec<Role> = live(&tables.roles).cloned().collect();
        roles.sort_by_key(|r| r.id);
        Ok(roles)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(live(&tables.roles).find(|r| r.id == id).cloned())
    }

    async fn code_taken(&self, code: &str) -> Result<bool, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(tables.roles.iter().any(|(r, _)| r.code == code))
    }

    async fn create(&self, role: &NewRole) -> Result<Role, AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        let now = Utc::now();
        let created = Role {
            id: tables.next_id(),
            name: role.name.clone(),
            code: role.code.clone(),
            description: role.description.clone(),
            status: role.status,
            created_at: now,
            updated_at: now,
        };
        tables.roles.push((created.clone(), false));
        Ok(created)
    }

    async fn update(&self, id: i64, patch: &RolePatch) -> Result<Role, AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        let (role, _) = tables
            .roles
            .iter_mut()
            .find(|(r, _)| r.id == id)
            .ok_or(AdminServiceError::RoleNotFound)?;
        if let Some(ref v) = patch.name {
            role.name = v.clone();
        }
        if let Some(ref v) = patch.description {
            role.description = Some(v.clone());
        }
        if let Some(v) = patch.status {
            role.status = v;
        }
        Ok(role.clone())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        if let Some((_, deleted)) = tables.roles.iter_mut().find(|(r, _)| r.id == id) {
            *deleted = true;
        }
        Ok(())
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(live(&tables.roles)
            .map(|r| r.id)
            .filter(|id| ids.contains(id))
            .collect())
    }

    async fn permissions(&self, role_id: i64) -> Result<Vec<Permission>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        let ids: HashSet<i64> = tables
            .role_permissions
            .iter()
            .filter(|(r, _)| *r == role_id)
            .map(|(_, p)| *p)
            .collect();
        let mut out: Vec<Permission> = live(&tables.permissions)
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect();
        out.sort_by_key(|p| p.id);
        Ok(out)
    }

    async fn menus(&self, role_id: i64) -> Result<Vec<MenuNode>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        let ids: HashSet<i64> = tables
            .role_menus
            .iter()
            .filter(|(r, _)| *r == role_id)
            .map(|(_, m)| *m)
            .collect();
        Ok(ordered_menus(
            live(&tables.menus).filter(|m| ids.contains(&m.id)),
        ))
    }

    async fn replace_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> Result<(), AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        tables.role_permissions.retain(|(r, _)| *r != role_id);
        tables
            .role_permissions
            .extend(permission_ids.iter().map(|p| (role_id, *p)));
        Ok(())
    }

    async fn replace_menus(&self, role_id: i64, menu_ids: &[i64]) -> Result<(), AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        tables.role_menus.retain(|(r, _)| *r != role_id);
        tables
            .role_menus
            .extend(menu_ids.iter().map(|m| (role_id, *m)));
        Ok(())
    }
}

// ── MockPermissionRepo ───────────────────────────────────────────────────────

pub struct MockPermissionRepo {
    pub db: MemoryDb,
}

impl PermissionRepository for MockPermissionRepo {
    async fn list(&self) -> Result<Vec<Permission>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        let mut out: Vec<Permission> = live(&tables.permissions).cloned().collect();
        out.sort_by_key(|p| p.id);
        Ok(out)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Permission>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(live(&tables.permissions).find(|p| p.id == id).cloned())
    }

    async fn code_taken(&self, code: &str) -> Result<bool, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(tables.permissions.iter().any(|(p, _)| p.code == code))
    }

    async fn create(&self, permission: &NewPermission) -> Result<Permission, AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        let now = Utc::now();
        let created = Permission {
            id: tables.next_id(),
            name: permission.name.clone(),
            code: permission.code.clone(),
            kind: permission.kind,
            description: permission.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.permissions.push((created.clone(), false));
        Ok(created)
    }

    async fn update(
        &self,
        id: i64,
        patch: &PermissionPatch,
    ) -> Result<Permission, AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        let (permission, _) = tables
            .permissions
            .iter_mut()
            .find(|(p, _)| p.id == id)
            .ok_or(AdminServiceError::PermissionNotFound)?;
        if let Some(ref v) = patch.name {
            permission.name = v.clone();
        }
        if let Some(v) = patch.kind {
            permission.kind = v;
        }
        if let Some(ref v) = patch.description {
            permission.description = Some(v.clone());
        }
        Ok(permission.clone())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        if let Some((_, deleted)) = tables.permissions.iter_mut().find(|(p, _)| p.id == id) {
            *deleted = true;
        }
        Ok(())
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(live(&tables.permissions)
            .map(|p| p.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}

// ── MockMenuRepo ─────────────────────────────────────────────────────────────

pub struct MockMenuRepo {
    pub db: MemoryDb,
}

impl MenuRepository for MockMenuRepo {
    async fn list(&self, include_disabled: bool) -> Result<Vec<MenuNode>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(ordered_menus(
            live(&tables.menus).filter(|m| include_disabled || m.status.is_enabled()),
        ))
    }

    async fn list_enabled_by_ids(&self, ids: &[i64]) -> Result<Vec<MenuNode>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(ordered_menus(
            live(&tables.menus).filter(|m| m.status.is_enabled() && ids.contains(&m.id)),
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MenuNode>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(live(&tables.menus).find(|m| m.id == id).cloned())
    }

    async fn name_taken(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(tables
            .menus
            .iter()
            .any(|(m, _)| m.name == name && Some(m.id) != exclude_id))
    }

    async fn edges(&self) -> Result<Vec<(i64, i64)>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(live(&tables.menus).map(|m| (m.id, m.parent_id)).collect())
    }

    async fn create(&self, menu: &NewMenu) -> Result<MenuNode, AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        let created = MenuNode {
            id: tables.next_id(),
            parent_id: menu.parent_id,
            title: menu.title.clone(),
            name: menu.name.clone(),
            path: menu.path.clone(),
            component: menu.component.clone(),
            icon: menu.icon.clone(),
            sort: menu.sort,
            hidden: menu.hidden,
            keep_alive: menu.keep_alive,
            status: menu.status,
            created_at: Utc::now(),
        };
        tables.menus.push((created.clone(), false));
        Ok(created)
    }

    async fn update(&self, id: i64, patch: &MenuPatch) -> Result<MenuNode, AdminServiceError> {
        let mut tables = self.db.tables.lock().unwrap();
        let (menu, _) = tables
            .menus
            .iter_mut()
            .find(|(m, _)| m.id == id)
            .ok_or(AdminServiceError::MenuNotFound)?;
        if let Some(v) = patch.parent_id {
            menu.parent_id = v;
        }
        if let Some(ref v) = patch.title {
            menu.title = v.clone();
        }
        if let Some(ref v) = patch.name {
            menu.name = v.clone();
        }
        if let Some(ref v) = patch.path {
            menu.path = Some(v.clone());
        }
        if let Some(ref v) = patch.component {
            menu.component = Some(v.clone());
        }
        if let Some(ref v) = patch.icon {
            menu.icon = Some(v.clone());
        }
        if let Some(v) = patch.sort {
            menu.sort = v;
        }
        if let Some(v) = patch.hidden {
            menu.hidden = v;
        }
        if let Some(v) = patch.keep_alive {
            menu.keep_alive = v;
        }
        if let Some(v) = patch.status {
            menu.status = v;
        }
        Ok(menu.clone())
    }

    async fn delete_subtree(&self, id: i64) -> Result<Vec<i64>, AdminServiceError> {
        let edges = self.edges().await?;
        let ids = yiya_admin::domain::menu_tree::subtree_ids(&edges, id);
        let mut tables = self.db.tables.lock().unwrap();
        for (menu, deleted) in tables.menus.iter_mut() {
            if ids.contains(&menu.id) {
                *deleted = true;
            }
        }
        Ok(ids)
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AdminServiceError> {
        let tables = self.db.tables.lock().unwrap();
        Ok(live(&tables.menus)
            .map(|m| m.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}

// ── MockTokenStore ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockTokenStore {
    pub refresh: Arc<Mutex<HashSet<(i64, String)>>>,
    pub blacklist: Arc<Mutex<HashSet<String>>>,
}

impl MockTokenStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Another store over the same sets, for chaining use cases.
    pub fn share(&self) -> Self {
        Self {
            refresh: Arc::clone(&self.refresh),
            blacklist: Arc::clone(&self.blacklist),
        }
    }
}

impl TokenStore for MockTokenStore {
    async fn store_refresh(
        &self,
        user_id: i64,
        token: &str,
        _ttl_secs: u64,
    ) -> Result<(), AdminServiceError> {
        self.refresh
            .lock()
            .unwrap()
            .insert((user_id, token.to_owned()));
        Ok(())
    }

    async fn refresh_exists(&self, user_id: i64, token: &str) -> Result<bool, AdminServiceError> {
        Ok(self
            .refresh
            .lock()
            .unwrap()
            .contains(&(user_id, token.to_owned())))
    }

    async fn remove_refresh(&self, user_id: i64, token: &str) -> Result<(), AdminServiceError> {
        self.refresh
            .lock()
            .unwrap()
            .remove(&(user_id, token.to_owned()));
        Ok(())
    }

    async fn blacklist(&self, token: &str, _ttl_secs: u64) -> Result<(), AdminServiceError> {
        self.blacklist.lock().unwrap().insert(token.to_owned());
        Ok(())
    }

    async fn is_blacklisted(&self, token: &str) -> Result<bool, AdminServiceError> {
        Ok(self.blacklist.lock().unwrap().contains(token))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub const TEST_PASSWORD: &str = "admin123";

pub fn test_user(id: i64, username: &str) -> AdminUser {
    let now = Utc::now();
    AdminUser {
        id,
        username: username.to_owned(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        real_name: None,
        phone: None,
        email: None,
        avatar: None,
        status: Status::Enabled,
        last_login_at: None,
        last_login_ip: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_role(id: i64, code: &str) -> Role {
    let now = Utc::now();
    Role {
        id,
        name: code.to_lowercase(),
        code: code.to_owned(),
        description: None,
        status: Status::Enabled,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_permission(id: i64, code: &str) -> Permission {
    let now = Utc::now();
    Permission {
        id,
        name: code.to_owned(),
        code: code.to_owned(),
        kind: PermissionKind::Api,
        description: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_menu(id: i64, parent_id: i64, sort: i32) -> MenuNode {
    MenuNode {
        id,
        parent_id,
        title: format!("Menu {id}"),
        name: format!("menu_{id}"),
        path: Some(format!("/menu/{id}")),
        component: None,
        icon: None,
        sort,
        hidden: 0,
        keep_alive: 0,
        status: Status::Enabled,
        created_at: Utc::now(),
    }
}
