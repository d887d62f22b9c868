use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000002_virtual_airline::VirtualAirline;

static IDX_DATA_PROVIDER_CONFIG_VA_ID_TYPE: &str = "idx_data_provider_config_va_id_provider_type";
static FK_DATA_PROVIDER_CONFIG_VA_ID: &str = "fk_data_provider_config_va_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DataProviderConfig::Table)
                    .if_not_exists()
                    .col(pk_auto(DataProviderConfig::Id))
                    .col(integer(DataProviderConfig::VaId))
                    .col(string(DataProviderConfig::ProviderType))
                    .col(integer(DataProviderConfig::ConfigVersion))
                    .col(boolean(DataProviderConfig::IsActive))
                    .col(string(DataProviderConfig::ValidationStatus))
                    .col(json(DataProviderConfig::ConfigData))
                    .col(json(DataProviderConfig::FeaturesEnabled))
                    .col(string_null(DataProviderConfig::CreatedBy))
                    .col(string_null(DataProviderConfig::UpdatedBy))
                    .col(timestamp(DataProviderConfig::CreatedAt))
                    .col(timestamp(DataProviderConfig::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DATA_PROVIDER_CONFIG_VA_ID_TYPE)
                    .table(DataProviderConfig::Table)
                    .col(DataProviderConfig::VaId)
                    .col(DataProviderConfig::ProviderType)
                    .col(DataProviderConfig::ConfigVersion)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DATA_PROVIDER_CONFIG_VA_ID)
                    .from_tbl(DataProviderConfig::Table)
                    .from_col(DataProviderConfig::VaId)
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
                    .name(FK_DATA_PROVIDER_CONFIG_VA_ID)
                    .table(DataProviderConfig::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DATA_PROVIDER_CONFIG_VA_ID_TYPE)
                    .table(DataProviderConfig::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DataProviderConfig::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DataProviderConfig {
    Table,
    Id,
    VaId,
    ProviderType,
    ConfigVersion,
    IsActive,
    ValidationStatus,
    ConfigData,
    FeaturesEnabled,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
