use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUserRole::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdminUserRole::UserId).big_integer().not_null())
                    .col(ColumnDef::new(AdminUserRole::RoleId).big_integer().not_null())
                    .col(
                        ColumnDef::new(AdminUserRole::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(AdminUserRole::UserId)
                            .col(AdminUserRole::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AdminUserRole::Table, AdminUserRole::UserId)
                            .to(AdminUser::Table, AdminUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AdminUserRole::Table, AdminUserRole::RoleId)
                            .to(AdminRole::Table, AdminRole::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminRolePermission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminRolePermission::RoleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminRolePermission::PermissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminRolePermission::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(AdminRolePermission::RoleId)
                            .col(AdminRolePermission::PermissionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AdminRolePermission::Table, AdminRolePermission::RoleId)
                            .to(AdminRole::Table, AdminRole::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AdminRolePermission::Table,
                                AdminRolePermission::PermissionId,
                            )
                            .to(AdminPermission::Table, AdminPermission::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminRoleMenu::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdminRoleMenu::RoleId).big_integer().not_null())
                    .col(ColumnDef::new(AdminRoleMenu::MenuId).big_integer().not_null())
                    .col(
                        ColumnDef::new(AdminRoleMenu::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(AdminRoleMenu::RoleId)
                            .col(AdminRoleMenu::MenuId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AdminRoleMenu::Table, AdminRoleMenu::RoleId)
                            .to(AdminRole::Table, AdminRole::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AdminRoleMenu::Table, AdminRoleMenu::MenuId)
                            .to(AdminMenu::Table, AdminMenu::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminRoleMenu::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminRolePermission::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminUserRole::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AdminUserRole {
    Table,
    UserId,
    RoleId,
    CreatedAt,
}

#[derive(Iden)]
enum AdminRolePermission {
    Table,
    RoleId,
    PermissionId,
    CreatedAt,
}

#[derive(Iden)]
enum AdminRoleMenu {
    Table,
    RoleId,
    MenuId,
    CreatedAt,
}

#[derive(Iden)]
enum AdminUser {
    Table,
    Id,
}

#[derive(Iden)]
enum AdminRole {
    Table,
    Id,
}

#[derive(Iden)]
enum AdminPermission {
    Table,
    Id,
}

#[derive(Iden)]
enum AdminMenu {
    Table,
    Id,
}
