use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260301_000001_user::User, m20260301_000002_virtual_airline::VirtualAirline};

static IDX_VA_MEMBERSHIP_USER_VA: &str = "idx_va_membership_user_id_va_id";
static FK_VA_MEMBERSHIP_USER_ID: &str = "fk_va_membership_user_id";
static FK_VA_MEMBERSHIP_VA_ID: &str = "fk_va_membership_va_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VaMembership::Table)
                    .if_not_exists()
                    .col(pk_auto(VaMembership::Id))
                    .col(integer(VaMembership::UserId))
                    .col(integer(VaMembership::VaId))
                    .col(string(VaMembership::Role))
                    .col(string(VaMembership::Callsign))
                    .col(string_null(VaMembership::ProviderPilotId))
                    .col(boolean(VaMembership::IsActive))
                    .col(timestamp(VaMembership::JoinedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_VA_MEMBERSHIP_USER_VA)
                    .table(VaMembership::Table)
                    .col(VaMembership::UserId)
                    .col(VaMembership::VaId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VA_MEMBERSHIP_USER_ID)
                    .from_tbl(VaMembership::Table)
                    .from_col(VaMembership::UserId)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VA_MEMBERSHIP_VA_ID)
                    .from_tbl(VaMembership::Table)
                    .from_col(VaMembership::VaId)
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
                    .name(FK_VA_MEMBERSHIP_VA_ID)
                    .table(VaMembership::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_VA_MEMBERSHIP_USER_ID)
                    .table(VaMembership::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_VA_MEMBERSHIP_USER_VA)
                    .table(VaMembership::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VaMembership::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum VaMembership {
    Table,
    Id,
    UserId,
    VaId,
    Role,
    Callsign,
    ProviderPilotId,
    IsActive,
    JoinedAt,
}
