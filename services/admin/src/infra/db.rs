use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
    sea_query::Expr,
};

use yiya_admin_schema::{
    admin_menu, admin_permission, admin_role, admin_role_menu, admin_role_permission, admin_user,
    admin_user_role,
};
use yiya_core::sea_ext::SelectExt;
use yiya_domain::pagination::PageRequest;
use yiya_domain::status::Status;

use crate::domain::menu_tree::subtree_ids;
use crate::domain::repository::{
    MenuRepository, PermissionRepository, RoleRepository, UserRepository,
};
use crate::domain::types::{
    AdminUser, MenuNode, MenuPatch, NewMenu, NewPermission, NewRole, NewUser, Permission,
    PermissionPatch, ResolvedRole, ResolvedUser, Role, RolePatch, UserFilter, UserPatch,
};
use crate::error::AdminServiceError;

/// Turn a unique-constraint violation into `conflict`; anything else is internal.
fn unique_or_internal(
    err: DbErr,
    conflict: AdminServiceError,
    ctx: &'static str,
) -> AdminServiceError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return conflict;
    }
    AdminServiceError::Internal(anyhow::Error::new(err).context(ctx))
}

/// Unknown stored values read as disabled.
fn status_from_db(value: i32) -> Status {
    Status::from_i32(value).unwrap_or(Status::Disabled)
}

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<AdminUser>, AdminServiceError> {
        let model = admin_user::Entity::find_by_id(id)
            .not_deleted(admin_user::Column::DeletedAt)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, AdminServiceError> {
        let model = admin_user::Entity::find()
            .filter(admin_user::Column::Username.eq(username))
            .not_deleted(admin_user::Column::DeletedAt)
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn username_taken(&self, username: &str) -> Result<bool, AdminServiceError> {
        let count = admin_user::Entity::find()
            .filter(admin_user::Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("count users by username")?;
        Ok(count > 0)
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<(Vec<AdminUser>, u64), AdminServiceError> {
        let query = admin_user::Entity::find()
            .not_deleted(admin_user::Column::DeletedAt)
            .contains_opt(admin_user::Column::Username, filter.username.as_deref())
            .contains_opt(admin_user::Column::RealName, filter.real_name.as_deref());

        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = query
            .order_by_desc(admin_user::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.size))
            .all(&self.db)
            .await
            .context("list users")?;

        Ok((models.into_iter().map(user_from_model).collect(), total))
    }

    async fn create(&self, user: &NewUser) -> Result<AdminUser, AdminServiceError> {
        let now = Utc::now();
        let model = admin_user::ActiveModel {
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            real_name: Set(user.real_name.clone()),
            phone: Set(user.phone.clone()),
            email: Set(user.email.clone()),
            avatar: Set(None),
            status: Set(user.status.as_i32()),
            last_login_at: Set(None),
            last_login_ip: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| unique_or_internal(e, AdminServiceError::ContactExists, "create user"))?;
        Ok(user_from_model(model))
    }

    async fn update(&self, id: i64, patch: &UserPatch) -> Result<AdminUser, AdminServiceError> {
        let mut active = admin_user::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(ref v) = patch.real_name {
            active.real_name = Set(Some(v.clone()));
        }
        if let Some(ref v) = patch.phone {
            active.phone = Set(Some(v.clone()));
        }
        if let Some(ref v) = patch.email {
            active.email = Set(Some(v.clone()));
        }
        if let Some(v) = patch.status {
            active.status = Set(v.as_i32());
        }
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| unique_or_internal(e, AdminServiceError::ContactExists, "update user"))?;
        Ok(user_from_model(model))
    }

    async fn update_password(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<(), AdminServiceError> {
        admin_user::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password")?;
        Ok(())
    }

    async fn record_login(
        &self,
        id: i64,
        at: DateTime<Utc>,
        ip: Option<&str>,
    ) -> Result<(), AdminServiceError> {
        admin_user::ActiveModel {
            id: Set(id),
            last_login_at: Set(Some(at)),
            last_login_ip: Set(ip.map(str::to_owned)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("record user login")?;
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), AdminServiceError> {
        let now = Utc::now();
        admin_user::ActiveModel {
            id: Set(id),
            deleted_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("soft delete user")?;
        Ok(())
    }

    async fn replace_roles(&self, user_id: i64, role_ids: &[i64]) -> Result<(), AdminServiceError> {
        let role_ids = role_ids.to_vec();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    admin_user_role::Entity::delete_many()
                        .filter(admin_user_role::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    if role_ids.is_empty() {
                        return Ok(());
                    }
                    let now = Utc::now();
                    admin_user_role::Entity::insert_many(role_ids.into_iter().map(|role_id| {
                        admin_user_role::ActiveModel {
                            user_id: Set(user_id),
                            role_id: Set(role_id),
                            created_at: Set(now),
                        }
                    }))
                    .exec_without_returning(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("replace user roles")?;
        Ok(())
    }

    async fn resolve(&self, id: i64) -> Result<Option<ResolvedUser>, AdminServiceError> {
        let Some(user) = admin_user::Entity::find_by_id(id)
            .not_deleted(admin_user::Column::DeletedAt)
            .one(&self.db)
            .await
            .context("load user for resolve")?
        else {
            return Ok(None);
        };

        let role_ids: Vec<i64> = admin_user_role::Entity::find()
            .select_only()
            .column(admin_user_role::Column::RoleId)
            .filter(admin_user_role::Column::UserId.eq(id))
            .into_tuple()
            .all(&self.db)
            .await
            .context("load user role links")?;

        let mut roles = Vec::new();
        if !role_ids.is_empty() {
            let role_models = admin_role::Entity::find()
                .filter(admin_role::Column::Id.is_in(role_ids))
                .not_deleted(admin_role::Column::DeletedAt)
                .order_by_asc(admin_role::Column::Id)
                .all(&self.db)
                .await
                .context("load user roles")?;
            let live: Vec<i64> = role_models.iter().map(|r| r.id).collect();

            let mut permissions: HashMap<i64, Vec<String>> = HashMap::new();
            let links = admin_role_permission::Entity::find()
                .filter(admin_role_permission::Column::RoleId.is_in(live.clone()))
                .find_also_related(admin_permission::Entity)
                .all(&self.db)
                .await
                .context("load role permissions")?;
            for (link, permission) in links {
                if let Some(p) = permission.filter(|p| p.deleted_at.is_none()) {
                    permissions.entry(link.role_id).or_default().push(p.code);
                }
            }

            let mut menus: HashMap<i64, Vec<i64>> = HashMap::new();
            let menu_links: Vec<(i64, i64)> = admin_role_menu::Entity::find()
                .select_only()
                .column(admin_role_menu::Column::RoleId)
                .column(admin_role_menu::Column::MenuId)
                .filter(admin_role_menu::Column::RoleId.is_in(live))
                .into_tuple()
                .all(&self.db)
                .await
                .context("load role menus")?;
            for (role_id, menu_id) in menu_links {
                menus.entry(role_id).or_default().push(menu_id);
            }

            roles = role_models
                .into_iter()
                .map(|r| ResolvedRole {
                    id: r.id,
                    status: status_from_db(r.status),
                    permissions: permissions.remove(&r.id).unwrap_or_default(),
                    menu_ids: menus.remove(&r.id).unwrap_or_default(),
                    code: r.code,
                })
                .collect();
        }

        Ok(Some(ResolvedUser {
            id: user.id,
            username: user.username,
            status: status_from_db(user.status),
            roles,
        }))
    }
}

fn user_from_model(model: admin_user::Model) -> AdminUser {
    AdminUser {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        real_name: model.real_name,
        phone: model.phone,
        email: model.email,
        avatar: model.avatar,
        status: status_from_db(model.status),
        last_login_at: model.last_login_at,
        last_login_ip: model.last_login_ip,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Role repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn list(&self) -> Result<Vec<Role>, AdminServiceError> {
        let models = admin_role::Entity::find()
            .not_deleted(admin_role::Column::DeletedAt)
            .order_by_asc(admin_role::Column::Id)
            .all(&self.db)
            .await
            .context("list roles")?;
        Ok(models.into_iter().map(role_from_model).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, AdminServiceError> {
        let model = admin_role::Entity::find_by_id(id)
            .not_deleted(admin_role::Column::DeletedAt)
            .one(&self.db)
            .await
            .context("find role by id")?;
        Ok(model.map(role_from_model))
    }

    async fn code_taken(&self, code: &str) -> Result<bool, AdminServiceError> {
        let count = admin_role::Entity::find()
            .filter(admin_role::Column::Code.eq(code))
            .count(&self.db)
            .await
            .context("count roles by code")?;
        Ok(count > 0)
    }

    async fn create(&self, role: &NewRole) -> Result<Role, AdminServiceError> {
        let now = Utc::now();
        let model = admin_role::ActiveModel {
            name: Set(role.name.clone()),
            code: Set(role.code.clone()),
            description: Set(role.description.clone()),
            status: Set(role.status.as_i32()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| unique_or_internal(e, AdminServiceError::RoleCodeExists, "create role"))?;
        Ok(role_from_model(model))
    }

    async fn update(&self, id: i64, patch: &RolePatch) -> Result<Role, AdminServiceError> {
        let mut active = admin_role::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(ref v) = patch.name {
            active.name = Set(v.clone());
        }
        if let Some(ref v) = patch.description {
            active.description = Set(Some(v.clone()));
        }
        if let Some(v) = patch.status {
            active.status = Set(v.as_i32());
        }
        let model = active.update(&self.db).await.context("update role")?;
        Ok(role_from_model(model))
    }

    async fn soft_delete(&self, id: i64) -> Result<(), AdminServiceError> {
        let now = Utc::now();
        admin_role::ActiveModel {
            id: Set(id),
            deleted_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("soft delete role")?;
        Ok(())
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AdminServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = admin_role::Entity::find()
            .select_only()
            .column(admin_role::Column::Id)
            .filter(admin_role::Column::Id.is_in(ids.to_vec()))
            .not_deleted(admin_role::Column::DeletedAt)
            .into_tuple()
            .all(&self.db)
            .await
            .context("resolve role ids")?;
        Ok(found)
    }

    async fn permissions(&self, role_id: i64) -> Result<Vec<Permission>, AdminServiceError> {
        let models = admin_permission::Entity::find()
            .inner_join(admin_role_permission::Entity)
            .filter(admin_role_permission::Column::RoleId.eq(role_id))
            .not_deleted(admin_permission::Column::DeletedAt)
            .order_by_asc(admin_permission::Column::Id)
            .all(&self.db)
            .await
            .context("list role permissions")?;
        Ok(models.into_iter().map(permission_from_model).collect())
    }

    async fn menus(&self, role_id: i64) -> Result<Vec<MenuNode>, AdminServiceError> {
        let models = admin_menu::Entity::find()
            .inner_join(admin_role_menu::Entity)
            .filter(admin_role_menu::Column::RoleId.eq(role_id))
            .not_deleted(admin_menu::Column::DeletedAt)
            .order_by_asc(admin_menu::Column::Sort)
            .order_by_asc(admin_menu::Column::Id)
            .all(&self.db)
            .await
            .context("list role menus")?;
        Ok(models.into_iter().map(menu_from_model).collect())
    }

    async fn replace_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> Result<(), AdminServiceError> {
        let permission_ids = permission_ids.to_vec();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    admin_role_permission::Entity::delete_many()
                        .filter(admin_role_permission::Column::RoleId.eq(role_id))
                        .exec(txn)
                        .await?;
                    if permission_ids.is_empty() {
                        return Ok(());
                    }
                    let now = Utc::now();
                    admin_role_permission::Entity::insert_many(permission_ids.into_iter().map(
                        |permission_id| admin_role_permission::ActiveModel {
                            role_id: Set(role_id),
                            permission_id: Set(permission_id),
                            created_at: Set(now),
                        },
                    ))
                    .exec_without_returning(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("replace role permissions")?;
        Ok(())
    }

    async fn replace_menus(&self, role_id: i64, menu_ids: &[i64]) -> Result<(), AdminServiceError> {
        let menu_ids = menu_ids.to_vec();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    admin_role_menu::Entity::delete_many()
                        .filter(admin_role_menu::Column::RoleId.eq(role_id))
                        .exec(txn)
                        .await?;
                    if menu_ids.is_empty() {
                        return Ok(());
                    }
                    let now = Utc::now();
                    admin_role_menu::Entity::insert_many(menu_ids.into_iter().map(|menu_id| {
                        admin_role_menu::ActiveModel {
                            role_id: Set(role_id),
                            menu_id: Set(menu_id),
                            created_at: Set(now),
                        }
                    }))
                    .exec_without_returning(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("replace role menus")?;
        Ok(())
    }
}

fn role_from_model(model: admin_role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        code: model.code,
        description: model.description,
        status: status_from_db(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Permission repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPermissionRepository {
    pub db: DatabaseConnection,
}

impl PermissionRepository for DbPermissionRepository {
    async fn list(&self) -> Result<Vec<Permission>, AdminServiceError> {
        let models = admin_permission::Entity::find()
            .not_deleted(admin_permission::Column::DeletedAt)
            .order_by_asc(admin_permission::Column::Id)
            .all(&self.db)
            .await
            .context("list permissions")?;
        Ok(models.into_iter().map(permission_from_model).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Permission>, AdminServiceError> {
        let model = admin_permission::Entity::find_by_id(id)
            .not_deleted(admin_permission::Column::DeletedAt)
            .one(&self.db)
            .await
            .context("find permission by id")?;
        Ok(model.map(permission_from_model))
    }

    async fn code_taken(&self, code: &str) -> Result<bool, AdminServiceError> {
        let count = admin_permission::Entity::find()
            .filter(admin_permission::Column::Code.eq(code))
            .count(&self.db)
            .await
            .context("count permissions by code")?;
        Ok(count > 0)
    }

    async fn create(&self, permission: &NewPermission) -> Result<Permission, AdminServiceError> {
        let now = Utc::now();
        let model = admin_permission::ActiveModel {
            name: Set(permission.name.clone()),
            code: Set(permission.code.clone()),
            kind: Set(permission.kind.as_str().to_owned()),
            description: Set(permission.description.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            unique_or_internal(e, AdminServiceError::PermissionCodeExists, "create permission")
        })?;
        Ok(permission_from_model(model))
    }

    async fn update(
        &self,
        id: i64,
        patch: &PermissionPatch,
    ) -> Result<Permission, AdminServiceError> {
        let mut active = admin_permission::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(ref v) = patch.name {
            active.name = Set(v.clone());
        }
        if let Some(v) = patch.kind {
            active.kind = Set(v.as_str().to_owned());
        }
        if let Some(ref v) = patch.description {
            active.description = Set(Some(v.clone()));
        }
        let model = active
            .update(&self.db)
            .await
            .context("update permission")?;
        Ok(permission_from_model(model))
    }

    async fn soft_delete(&self, id: i64) -> Result<(), AdminServiceError> {
        let now = Utc::now();
        admin_permission::ActiveModel {
            id: Set(id),
            deleted_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("soft delete permission")?;
        Ok(())
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AdminServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = admin_permission::Entity::find()
            .select_only()
            .column(admin_permission::Column::Id)
            .filter(admin_permission::Column::Id.is_in(ids.to_vec()))
            .not_deleted(admin_permission::Column::DeletedAt)
            .into_tuple()
            .all(&self.db)
            .await
            .context("resolve permission ids")?;
        Ok(found)
    }
}

fn permission_from_model(model: admin_permission::Model) -> Permission {
    Permission {
        id: model.id,
        name: model.name,
        kind: model.kind.parse().unwrap_or_default(),
        code: model.code,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Menu repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMenuRepository {
    pub db: DatabaseConnection,
}

impl MenuRepository for DbMenuRepository {
    async fn list(&self, include_disabled: bool) -> Result<Vec<MenuNode>, AdminServiceError> {
        let mut query = admin_menu::Entity::find().not_deleted(admin_menu::Column::DeletedAt);
        if !include_disabled {
            query = query.filter(admin_menu::Column::Status.eq(Status::Enabled.as_i32()));
        }
        let models = query
            .order_by_asc(admin_menu::Column::Sort)
            .order_by_asc(admin_menu::Column::Id)
            .all(&self.db)
            .await
            .context("list menus")?;
        Ok(models.into_iter().map(menu_from_model).collect())
    }

    async fn list_enabled_by_ids(&self, ids: &[i64]) -> Result<Vec<MenuNode>, AdminServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = admin_menu::Entity::find()
            .filter(admin_menu::Column::Id.is_in(ids.to_vec()))
            .filter(admin_menu::Column::Status.eq(Status::Enabled.as_i32()))
            .not_deleted(admin_menu::Column::DeletedAt)
            .order_by_asc(admin_menu::Column::Sort)
            .order_by_asc(admin_menu::Column::Id)
            .all(&self.db)
            .await
            .context("list menus by ids")?;
        Ok(models.into_iter().map(menu_from_model).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MenuNode>, AdminServiceError> {
        let model = admin_menu::Entity::find_by_id(id)
            .not_deleted(admin_menu::Column::DeletedAt)
            .one(&self.db)
            .await
            .context("find menu by id")?;
        Ok(model.map(menu_from_model))
    }

    async fn name_taken(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AdminServiceError> {
        let mut query = admin_menu::Entity::find().filter(admin_menu::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(admin_menu::Column::Id.ne(id));
        }
        let count = query
            .count(&self.db)
            .await
            .context("count menus by name")?;
        Ok(count > 0)
    }

    async fn edges(&self) -> Result<Vec<(i64, i64)>, AdminServiceError> {
        let edges = admin_menu::Entity::find()
            .select_only()
            .column(admin_menu::Column::Id)
            .column(admin_menu::Column::ParentId)
            .not_deleted(admin_menu::Column::DeletedAt)
            .into_tuple()
            .all(&self.db)
            .await
            .context("load menu edges")?;
        Ok(edges)
    }

    async fn create(&self, menu: &NewMenu) -> Result<MenuNode, AdminServiceError> {
        let now = Utc::now();
        let model = admin_menu::ActiveModel {
            parent_id: Set(menu.parent_id),
            title: Set(menu.title.clone()),
            name: Set(menu.name.clone()),
            path: Set(menu.path.clone()),
            component: Set(menu.component.clone()),
            icon: Set(menu.icon.clone()),
            sort: Set(menu.sort),
            hidden: Set(menu.hidden),
            keep_alive: Set(menu.keep_alive),
            status: Set(menu.status.as_i32()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| unique_or_internal(e, AdminServiceError::MenuNameExists, "create menu"))?;
        Ok(menu_from_model(model))
    }

    async fn update(&self, id: i64, patch: &MenuPatch) -> Result<MenuNode, AdminServiceError> {
        let mut active = admin_menu::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(v) = patch.parent_id {
            active.parent_id = Set(v);
        }
        if let Some(ref v) = patch.title {
            active.title = Set(v.clone());
        }
        if let Some(ref v) = patch.name {
            active.name = Set(v.clone());
        }
        if let Some(ref v) = patch.path {
            active.path = Set(Some(v.clone()));
        }
        if let Some(ref v) = patch.component {
            active.component = Set(Some(v.clone()));
        }
        if let Some(ref v) = patch.icon {
            active.icon = Set(Some(v.clone()));
        }
        if let Some(v) = patch.sort {
            active.sort = Set(v);
        }
        if let Some(v) = patch.hidden {
            active.hidden = Set(v);
        }
        if let Some(v) = patch.keep_alive {
            active.keep_alive = Set(v);
        }
        if let Some(v) = patch.status {
            active.status = Set(v.as_i32());
        }
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| unique_or_internal(e, AdminServiceError::MenuNameExists, "update menu"))?;
        Ok(menu_from_model(model))
    }

    async fn delete_subtree(&self, id: i64) -> Result<Vec<i64>, AdminServiceError> {
        let deleted = self
            .db
            .transaction::<_, Vec<i64>, DbErr>(|txn| {
                Box::pin(async move {
                    let edges: Vec<(i64, i64)> = admin_menu::Entity::find()
                        .select_only()
                        .column(admin_menu::Column::Id)
                        .column(admin_menu::Column::ParentId)
                        .not_deleted(admin_menu::Column::DeletedAt)
                        .into_tuple()
                        .all(txn)
                        .await?;
                    let ids = subtree_ids(&edges, id);
                    let now = Utc::now();
                    admin_menu::Entity::update_many()
                        .col_expr(admin_menu::Column::DeletedAt, Expr::value(now))
                        .col_expr(admin_menu::Column::UpdatedAt, Expr::value(now))
                        .filter(admin_menu::Column::Id.is_in(ids.clone()))
                        .filter(admin_menu::Column::DeletedAt.is_null())
                        .exec(txn)
                        .await?;
                    Ok(ids)
                })
            })
            .await
            .context("delete menu subtree")?;
        Ok(deleted)
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AdminServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = admin_menu::Entity::find()
            .select_only()
            .column(admin_menu::Column::Id)
            .filter(admin_menu::Column::Id.is_in(ids.to_vec()))
            .not_deleted(admin_menu::Column::DeletedAt)
            .into_tuple()
            .all(&self.db)
            .await
            .context("resolve menu ids")?;
        Ok(found)
    }
}

fn menu_from_model(model: admin_menu::Model) -> MenuNode {
    MenuNode {
        id: model.id,
        parent_id: model.parent_id,
        title: model.title,
        name: model.name,
        path: model.path,
        component: model.component,
        icon: model.icon,
        sort: model.sort,
        hidden: model.hidden,
        keep_alive: model.keep_alive,
        status: status_from_db(model.status),
        created_at: model.created_at,
    }
}
