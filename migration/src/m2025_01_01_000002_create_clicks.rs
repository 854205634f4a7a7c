//! Migration to create the clicks table.
//!
//! `link_token` references `clients.link_token` logically; no foreign key is
//! declared, the click tracker checks the reference before inserting.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clicks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clicks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clicks::LinkToken).string_len(64).not_null())
                    .col(ColumnDef::new(Clicks::Phone).text().null())
                    .col(ColumnDef::new(Clicks::Name).text().null())
                    .col(ColumnDef::new(Clicks::NationalId).text().null())
                    .col(ColumnDef::new(Clicks::SourceAddress).text().null())
                    .col(ColumnDef::new(Clicks::UserAgent).text().null())
                    .col(
                        ColumnDef::new(Clicks::ClickedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clicks_link_token")
                    .table(Clicks::Table)
                    .col(Clicks::LinkToken)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clicks_clicked_at")
                    .table(Clicks::Table)
                    .col(Clicks::ClickedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clicks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clicks {
    Table,
    Id,
    LinkToken,
    Phone,
    Name,
    NationalId,
    SourceAddress,
    UserAgent,
    ClickedAt,
}
