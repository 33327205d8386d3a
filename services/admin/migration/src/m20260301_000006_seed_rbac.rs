use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};

use yiya_admin_schema::{
    admin_menu, admin_permission, admin_role, admin_role_menu, admin_role_permission, admin_user,
    admin_user_role,
};
use yiya_domain::permission::{PermissionKind, SUPER_ADMIN_ROLE_CODE, codes};

/// Password for the bootstrap `admin` account. The account is only created
/// when this is set.
const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";

const ROLES: &[(&str, &str, &str)] = &[
    (SUPER_ADMIN_ROLE_CODE, "超级管理员", "拥有系统所有权限"),
    ("ADMIN", "管理员", "系统管理员"),
    ("USER", "普通用户", "普通用户"),
];

pub(crate) const PERMISSIONS: &[(&str, &str)] = &[
    (codes::USER_LIST, "查看用户列表"),
    (codes::USER_CREATE, "创建用户"),
    (codes::USER_DETAIL, "查看用户详情"),
    (codes::USER_UPDATE, "更新用户"),
    (codes::USER_DELETE, "删除用户"),
    (codes::USER_RESET, "重置密码"),
    (codes::USER_ASSIGN_ROLE, "分配角色"),
    (codes::ROLE_LIST, "查看角色列表"),
    (codes::ROLE_CREATE, "创建角色"),
    (codes::ROLE_DETAIL, "查看角色详情"),
    (codes::ROLE_UPDATE, "更新角色"),
    (codes::ROLE_DELETE, "删除角色"),
    (codes::ROLE_ASSIGN_PERMISSION, "分配权限"),
    (codes::ROLE_ASSIGN_MENU, "分配菜单"),
    (codes::PERMISSION_LIST, "查看权限列表"),
    (codes::PERMISSION_CREATE, "创建权限"),
    (codes::PERMISSION_DETAIL, "查看权限详情"),
    (codes::PERMISSION_UPDATE, "更新权限"),
    (codes::PERMISSION_DELETE, "删除权限"),
    (codes::MENU_LIST, "查看菜单列表"),
    (codes::MENU_CREATE, "创建菜单"),
    (codes::MENU_UPDATE, "更新菜单"),
    (codes::MENU_DELETE, "删除菜单"),
];

struct SeedMenu {
    title: &'static str,
    name: &'static str,
    path: &'static str,
    component: &'static str,
    icon: &'static str,
}

const DASHBOARD: SeedMenu = SeedMenu {
    title: "仪表盘",
    name: "Dashboard",
    path: "/dashboard",
    component: "dashboard/index",
    icon: "Odometer",
};

const SYSTEM: SeedMenu = SeedMenu {
    title: "系统管理",
    name: "System",
    path: "/system",
    component: "Layout",
    icon: "Setting",
};

const SYSTEM_CHILDREN: &[SeedMenu] = &[
    SeedMenu {
        title: "用户管理",
        name: "User",
        path: "/system/user",
        component: "system/user/index",
        icon: "User",
    },
    SeedMenu {
        title: "角色管理",
        name: "Role",
        path: "/system/role",
        component: "system/role/index",
        icon: "UserFilled",
    },
    SeedMenu {
        title: "权限管理",
        name: "Permission",
        path: "/system/permission",
        component: "system/permission/index",
        icon: "Lock",
    },
    SeedMenu {
        title: "菜单管理",
        name: "Menu",
        path: "/system/menu",
        component: "system/menu/index",
        icon: "Menu",
    },
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let mut role_ids = Vec::with_capacity(ROLES.len());
        for (code, name, description) in ROLES {
            let role = admin_role::ActiveModel {
                code: Set((*code).to_owned()),
                name: Set((*name).to_owned()),
                description: Set(Some((*description).to_owned())),
                status: Set(1),
                ..Default::default()
            }
            .insert(db)
            .await?;
            role_ids.push((role.code, role.id));
        }

        let mut permission_ids = Vec::with_capacity(PERMISSIONS.len());
        for (code, name) in PERMISSIONS {
            let permission = admin_permission::ActiveModel {
                code: Set((*code).to_owned()),
                name: Set((*name).to_owned()),
                kind: Set(PermissionKind::Api.as_str().to_owned()),
                description: Set(Some((*name).to_owned())),
                ..Default::default()
            }
            .insert(db)
            .await?;
            permission_ids.push(permission.id);
        }

        let dashboard = insert_menu(db, &DASHBOARD, 0, 1).await?;
        let system = insert_menu(db, &SYSTEM, 0, 2).await?;
        let mut menu_ids = vec![dashboard, system];
        for (i, child) in SYSTEM_CHILDREN.iter().enumerate() {
            menu_ids.push(insert_menu(db, child, system, i as i32 + 1).await?);
        }

        // ADMIN gets the whole catalog; USER only sees the dashboard.
        // SUPER_ADMIN needs no grants.
        let role_id = |code: &str| {
            role_ids
                .iter()
                .find(|(c, _)| c == code)
                .map(|(_, id)| *id)
                .ok_or_else(|| DbErr::Custom(format!("seed role {code} missing")))
        };
        let admin_role_id = role_id("ADMIN")?;
        let user_role_id = role_id("USER")?;

        for permission_id in &permission_ids {
            admin_role_permission::ActiveModel {
                role_id: Set(admin_role_id),
                permission_id: Set(*permission_id),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
        for menu_id in &menu_ids {
            admin_role_menu::ActiveModel {
                role_id: Set(admin_role_id),
                menu_id: Set(*menu_id),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
        admin_role_menu::ActiveModel {
            role_id: Set(user_role_id),
            menu_id: Set(dashboard),
            ..Default::default()
        }
        .insert(db)
        .await?;

        if let Ok(password) = std::env::var(SEED_ADMIN_PASSWORD_ENV) {
            let password_hash = yiya_auth_types::password::hash_password(&password)
                .map_err(|e| DbErr::Custom(format!("hash seed password: {e}")))?;
            let admin = admin_user::ActiveModel {
                username: Set("admin".to_owned()),
                password_hash: Set(password_hash),
                real_name: Set(Some("超级管理员".to_owned())),
                status: Set(1),
                ..Default::default()
            }
            .insert(db)
            .await?;
            admin_user_role::ActiveModel {
                user_id: Set(admin.id),
                role_id: Set(role_id(SUPER_ADMIN_ROLE_CODE)?),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        admin_user::Entity::delete_many()
            .filter(admin_user::Column::Username.eq("admin"))
            .exec(db)
            .await?;

        let menu_names = [DASHBOARD.name, SYSTEM.name]
            .into_iter()
            .chain(SYSTEM_CHILDREN.iter().map(|m| m.name));
        admin_menu::Entity::delete_many()
            .filter(admin_menu::Column::Name.is_in(menu_names))
            .exec(db)
            .await?;

        admin_permission::Entity::delete_many()
            .filter(admin_permission::Column::Code.is_in(PERMISSIONS.iter().map(|(c, _)| *c)))
            .exec(db)
            .await?;

        admin_role::Entity::delete_many()
            .filter(admin_role::Column::Code.is_in(ROLES.iter().map(|(c, _, _)| *c)))
            .exec(db)
            .await?;

        Ok(())
    }
}

async fn insert_menu<C: ConnectionTrait>(
    db: &C,
    menu: &SeedMenu,
    parent_id: i64,
    sort: i32,
) -> Result<i64, DbErr> {
    let model = admin_menu::ActiveModel {
        parent_id: Set(parent_id),
        title: Set(menu.title.to_owned()),
        name: Set(menu.name.to_owned()),
        path: Set(Some(menu.path.to_owned())),
        component: Set(Some(menu.component.to_owned())),
        icon: Set(Some(menu.icon.to_owned())),
        sort: Set(sort),
        hidden: Set(0),
        keep_alive: Set(1),
        status: Set(1),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model.id)
}
