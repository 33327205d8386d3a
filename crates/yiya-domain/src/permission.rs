//! Permission catalog types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role code that grants universal access.
///
/// Matched by value against `Role::code`; not configurable per deployment.
pub const SUPER_ADMIN_ROLE_CODE: &str = "SUPER_ADMIN";

/// What a permission code guards.
///
/// Wire format: upper-case string (`"MENU"`, `"BUTTON"`, `"API"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionKind {
    Menu,
    Button,
    Api,
}

impl PermissionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "MENU",
            Self::Button => "BUTTON",
            Self::Api => "API",
        }
    }
}

impl Default for PermissionKind {
    fn default() -> Self {
        Self::Api
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown permission kind string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission kind: {0}")]
pub struct UnknownPermissionKind(pub String);

impl FromStr for PermissionKind {
    type Err = UnknownPermissionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MENU" => Ok(Self::Menu),
            "BUTTON" => Ok(Self::Button),
            "API" => Ok(Self::Api),
            other => Err(UnknownPermissionKind(other.to_owned())),
        }
    }
}

/// Permission codes checked by the admin routes (`sys:<resource>:<action>`).
pub mod codes {
    pub const USER_LIST: &str = "sys:user:list";
    pub const USER_CREATE: &str = "sys:user:create";
    pub const USER_DETAIL: &str = "sys:user:detail";
    pub const USER_UPDATE: &str = "sys:user:update";
    pub const USER_DELETE: &str = "sys:user:delete";
    pub const USER_RESET: &str = "sys:user:reset";
    pub const USER_ASSIGN_ROLE: &str = "sys:user:assign:role";

    pub const ROLE_LIST: &str = "sys:role:list";
    pub const ROLE_CREATE: &str = "sys:role:create";
    pub const ROLE_DETAIL: &str = "sys:role:detail";
    pub const ROLE_UPDATE: &str = "sys:role:update";
    pub const ROLE_DELETE: &str = "sys:role:delete";
    pub const ROLE_ASSIGN_PERMISSION: &str = "sys:role:assign:permission";
    pub const ROLE_ASSIGN_MENU: &str = "sys:role:assign:menu";

    pub const PERMISSION_LIST: &str = "sys:permission:list";
    pub const PERMISSION_CREATE: &str = "sys:permission:create";
    pub const PERMISSION_DETAIL: &str = "sys:permission:detail";
    pub const PERMISSION_UPDATE: &str = "sys:permission:update";
    pub const PERMISSION_DELETE: &str = "sys:permission:delete";

    pub const MENU_LIST: &str = "sys:menu:list";
    pub const MENU_CREATE: &str = "sys:menu:create";
    pub const MENU_UPDATE: &str = "sys:menu:update";
    pub const MENU_DELETE: &str = "sys:menu:delete";

    /// Every code above, in catalog order. Used to seed the permission table.
    pub const ALL: &[&str] = &[
        USER_LIST,
        USER_CREATE,
        USER_DETAIL,
        USER_UPDATE,
        USER_DELETE,
        USER_RESET,
        USER_ASSIGN_ROLE,
        ROLE_LIST,
        ROLE_CREATE,
        ROLE_DETAIL,
        ROLE_UPDATE,
        ROLE_DELETE,
        ROLE_ASSIGN_PERMISSION,
        ROLE_ASSIGN_MENU,
        PERMISSION_LIST,
        PERMISSION_CREATE,
        PERMISSION_DETAIL,
        PERMISSION_UPDATE,
        PERMISSION_DELETE,
        MENU_LIST,
        MENU_CREATE,
        MENU_UPDATE,
        MENU_DELETE,
    ];
}
