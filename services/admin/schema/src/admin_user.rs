use sea_orm::entity::prelude::*;

/// Back-office account. Soft-deleted via `deleted_at`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub real_name: Option<String>,
    #[sea_orm(unique)]
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub avatar: Option<String>,
    /// 0 = disabled, 1 = enabled.
    pub status: i32,
    pub last_login_at: Option<DateTimeUtc>,
    pub last_login_ip: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::admin_user_role::Entity")]
    UserRoles,
}

impl Related<super::admin_user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl Related<super::admin_role::Entity> for Entity {
    fn to() -> RelationDef {
        super::admin_user_role::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::admin_user_role::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
