use chrono::{DateTime, Utc};
use serde::Serialize;

use yiya_domain::permission::PermissionKind;
use yiya_domain::status::Status;

// ── Users ────────────────────────────────────────────────────────────────────

/// Back-office account.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub status: Status,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_login_ip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Status,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<Status>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.real_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.status.is_none()
    }
}

/// Substring filters for the user list.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub username: Option<String>,
    pub real_name: Option<String>,
}

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 100;

/// Username: 3–50 characters.
pub fn validate_username(username: &str) -> bool {
    let len = username.chars().count();
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len)
}

/// Password: 6–100 characters.
pub fn validate_password(password: &str) -> bool {
    let len = password.chars().count();
    (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len)
}

// ── Roles ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub status: Status,
}

/// Role code is immutable, so it is absent here.
#[derive(Debug, Clone, Default)]
pub struct RolePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
}

// ── Permissions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub kind: PermissionKind,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPermission {
    pub name: String,
    pub code: String,
    pub kind: PermissionKind,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PermissionPatch {
    pub name: Option<String>,
    pub kind: Option<PermissionKind>,
    pub description: Option<String>,
}

// ── Menus ────────────────────────────────────────────────────────────────────

/// Parent id of a root menu node.
pub const ROOT_PARENT_ID: i64 = 0;

/// Flat menu record as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: i64,
    pub parent_id: i64,
    pub title: String,
    pub name: String,
    pub path: Option<String>,
    pub component: Option<String>,
    pub icon: Option<String>,
    pub sort: i32,
    /// 0 = visible, 1 = hidden.
    pub hidden: i32,
    /// 0 = no cache, 1 = keep alive.
    pub keep_alive: i32,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl MenuNode {
    pub fn is_hidden(&self) -> bool {
        self.hidden == 1
    }
}

#[derive(Debug, Clone)]
pub struct NewMenu {
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
}

#[derive(Debug, Clone, Default)]
pub struct MenuPatch {
    pub parent_id: Option<i64>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub component: Option<String>,
    pub icon: Option<String>,
    pub sort: Option<i32>,
    pub hidden: Option<i32>,
    pub keep_alive: Option<i32>,
    pub status: Option<Status>,
}

/// Menu node with its children, as returned by the management tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuTreeNode {
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
    pub created_at: DateTime<Utc>,
    pub children: Vec<MenuTreeNode>,
}

/// Frontend route metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuMeta {
    pub icon: Option<String>,
    pub title: String,
    pub hidden: bool,
    #[serde(rename = "keepAlive")]
    pub keep_alive: bool,
}

/// Dynamic route consumed by the admin frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuRoute {
    pub id: i64,
    pub title: String,
    pub name: String,
    pub path: String,
    pub component: String,
    pub meta: MenuMeta,
    pub children: Vec<MenuRoute>,
}

// ── Resolved identity ────────────────────────────────────────────────────────

/// A role with its grants loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    pub id: i64,
    pub code: String,
    pub status: Status,
    /// Permission codes.
    pub permissions: Vec<String>,
    pub menu_ids: Vec<i64>,
}

/// The authenticated user with roles, role permissions and role menus
/// materialized. The access evaluator works only on this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub id: i64,
    pub username: String,
    pub status: Status,
    pub roles: Vec<ResolvedRole>,
}

impl ResolvedUser {
    /// Union of menu ids across all roles, deduplicated.
    pub fn menu_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .roles
            .iter()
            .flat_map(|r| r.menu_ids.iter().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Collapse duplicate ids, keeping first-seen order.
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
