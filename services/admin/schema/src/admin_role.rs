use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Stable role code, e.g. `SUPER_ADMIN`.
    #[sea_orm(unique)]
    pub code: String,
    pub description: Option<String>,
    pub status: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::admin_user_role::Entity")]
    UserRoles,
    #[sea_orm(has_many = "super::admin_role_permission::Entity")]
    RolePermissions,
    #[sea_orm(has_many = "super::admin_role_menu::Entity")]
    RoleMenus,
}

impl Related<super::admin_user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl Related<super::admin_role_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePermissions.def()
    }
}

impl Related<super::admin_role_menu::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleMenus.def()
    }
}

impl Related<super::admin_permission::Entity> for Entity {
    fn to() -> RelationDef {
        super::admin_role_permission::Relation::Permission.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::admin_role_permission::Relation::Role.def().rev())
    }
}

impl Related<super::admin_menu::Entity> for Entity {
    fn to() -> RelationDef {
        super::admin_role_menu::Relation::Menu.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::admin_role_menu::Relation::Role.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
