use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000002_virtual_airline::VirtualAirline;

static IDX_ROUTE_VA_ID_NAME: &str = "idx_route_va_id_name";
static FK_ROUTE_VA_ID: &str = "fk_route_va_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Route::Table)
                    .if_not_exists()
                    .col(pk_auto(Route::Id))
                    .col(integer(Route::VaId))
                    .col(string(Route::Name))
                    .col(string(Route::ProviderRecordId))
                    .col(timestamp(Route::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROUTE_VA_ID_NAME)
                    .table(Route::Table)
                    .col(Route::VaId)
                    .col(Route::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ROUTE_VA_ID)
                    .from_tbl(Route::Table)
                    .from_col(Route::VaId)
                    .to_tbl(VirtualAirline::Table)
                    .to_col(VirtualAirline::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ROUTE_VA_ID)
                    .table(Route::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROUTE_VA_ID_NAME)
                    .table(Route::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Route::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Route {
    Table,
    Id,
    VaId,
    Name,
    ProviderRecordId,
    CreatedAt,
}
