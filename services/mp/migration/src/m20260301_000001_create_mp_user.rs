use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MpUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MpUser::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MpUser::Openid)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MpUser::Unionid).string_len(100).null())
                    .col(ColumnDef::new(MpUser::SessionKey).string_len(100).null())
                    .col(ColumnDef::new(MpUser::Nickname).string_len(100).null())
                    .col(ColumnDef::new(MpUser::Avatar).string_len(500).null())
                    .col(ColumnDef::new(MpUser::Phone).string_len(20).null())
                    .col(ColumnDef::new(MpUser::Gender).integer().null())
                    .col(ColumnDef::new(MpUser::Country).string_len(50).null())
                    .col(ColumnDef::new(MpUser::Province).string_len(50).null())
                    .col(ColumnDef::new(MpUser::City).string_len(50).null())
                    .col(
                        ColumnDef::new(MpUser::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MpUser::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MpUser::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mp_user_unionid")
                    .table(MpUser::Table)
                    .col(MpUser::Unionid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MpUser::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MpUser {
    Table,
    Id,
    Openid,
    Unionid,
    SessionKey,
    Nickname,
    Avatar,
    Phone,
    Gender,
    Country,
    Province,
    City,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
