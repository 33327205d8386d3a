use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminPermission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminPermission::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminPermission::Name)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminPermission::Code)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AdminPermission::Type)
                            .string_len(20)
                            .not_null()
                            .default("API"),
                    )
                    .col(
                        ColumnDef::new(AdminPermission::Description)
                            .string_len(200)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AdminPermission::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdminPermission::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdminPermission::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminPermission::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AdminPermission {
    Table,
    Id,
    Name,
    Code,
    Type,
    Description,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
