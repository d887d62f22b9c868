use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Inserts a user; a user with an IFC username gets the Live API ID `ifc-{discord_id}`
    pub async fn insert_user(
        &self,
        discord_id: &str,
        ifc_username: Option<&str>,
    ) -> Result<entity::user::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::User::insert(entity::user::ActiveModel {
            discord_id: ActiveValue::Set(discord_id.to_string()),
            ifc_username: ActiveValue::Set(ifc_username.map(str::to_string)),
            ifc_user_id: ActiveValue::Set(ifc_username.map(|_| format!("ifc-{}", discord_id))),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Inserts an active pilot membership not yet linked to a provider record
    pub async fn insert_membership(
        &self,
        user_id: i32,
        va_id: i32,
        callsign: &str,
    ) -> Result<entity::va_membership::Model, TestError> {
        self.insert_membership_with(user_id, va_id, callsign, None)
            .await
    }

    /// Inserts an active pilot membership linked to a provider pilot record
    pub async fn insert_synced_membership(
        &self,
        user_id: i32,
        va_id: i32,
        callsign: &str,
        provider_pilot_id: &str,
    ) -> Result<entity::va_membership::Model, TestError> {
        self.insert_membership_with(user_id, va_id, callsign, Some(provider_pilot_id.to_string()))
            .await
    }

    async fn insert_membership_with(
        &self,
        user_id: i32,
        va_id: i32,
        callsign: &str,
        provider_pilot_id: Option<String>,
    ) -> Result<entity::va_membership::Model, TestError> {
        Ok(
            entity::prelude::VaMembership::insert(entity::va_membership::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                va_id: ActiveValue::Set(va_id),
                role: ActiveValue::Set("pilot".to_string()),
                callsign: ActiveValue::Set(callsign.to_string()),
                provider_pilot_id: ActiveValue::Set(provider_pilot_id),
                is_active: ActiveValue::Set(true),
                joined_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
