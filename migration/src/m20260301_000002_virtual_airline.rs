use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VirtualAirline::Table)
                    .if_not_exists()
                    .col(pk_auto(VirtualAirline::Id))
                    .col(string(VirtualAirline::Name))
                    .col(string_uniq(VirtualAirline::DiscordServerId))
                    .col(string_null(VirtualAirline::CallsignPrefix))
                    .col(string_null(VirtualAirline::CallsignSuffix))
                    .col(string_null(VirtualAirline::GameServer))
                    .col(json_null(VirtualAirline::FlightModesConfig))
                    .col(timestamp(VirtualAirline::CreatedAt))
                    .col(timestamp(VirtualAirline::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VirtualAirline::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum VirtualAirline {
    Table,
    Id,
    Name,
    DiscordServerId,
    CallsignPrefix,
    CallsignSuffix,
    GameServer,
    FlightModesConfig,
    CreatedAt,
    UpdatedAt,
}
