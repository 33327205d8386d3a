use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminMenu::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminMenu::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminMenu::ParentId)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(AdminMenu::Title).string_len(50).not_null())
                    .col(
                        ColumnDef::new(AdminMenu::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AdminMenu::Path).string_len(200).null())
                    .col(ColumnDef::new(AdminMenu::Component).string_len(200).null())
                    .col(ColumnDef::new(AdminMenu::Icon).string_len(50).null())
                    .col(
                        ColumnDef::new(AdminMenu::Sort)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminMenu::Hidden)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminMenu::KeepAlive)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(AdminMenu::Status)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(AdminMenu::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdminMenu::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdminMenu::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AdminMenu::Table)
                    .col(AdminMenu::ParentId)
                    .name("idx_admin_menu_parent_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminMenu::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AdminMenu {
    Table,
    Id,
    ParentId,
    Title,
    Name,
    Path,
    Component,
    Icon,
    Sort,
    Hidden,
    KeepAlive,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
