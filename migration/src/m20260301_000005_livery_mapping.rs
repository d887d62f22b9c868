use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000002_virtual_airline::VirtualAirline;

static IDX_LIVERY_MAPPING_VA_ID_LIVERY_ID: &str = "idx_livery_mapping_va_id_livery_id";
static FK_LIVERY_MAPPING_VA_ID: &str = "fk_livery_mapping_va_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LiveryMapping::Table)
                    .if_not_exists()
                    .col(pk_auto(LiveryMapping::Id))
                    .col(integer(LiveryMapping::VaId))
                    .col(string(LiveryMapping::LiveryId))
                    .col(string_null(LiveryMapping::AircraftId))
                    .col(string(LiveryMapping::AircraftName))
                    .col(string(LiveryMapping::AirlineName))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LIVERY_MAPPING_VA_ID_LIVERY_ID)
                    .table(LiveryMapping::Table)
                    .col(LiveryMapping::VaId)
                    .col(LiveryMapping::LiveryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LIVERY_MAPPING_VA_ID)
                    .from_tbl(LiveryMapping::Table)
                    .from_col(LiveryMapping::VaId)
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
                    .name(FK_LIVERY_MAPPING_VA_ID)
                    .table(LiveryMapping::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LIVERY_MAPPING_VA_ID_LIVERY_ID)
                    .table(LiveryMapping::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LiveryMapping::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LiveryMapping {
    Table,
    Id,
    VaId,
    LiveryId,
    AircraftId,
    AircraftName,
    AirlineName,
}
