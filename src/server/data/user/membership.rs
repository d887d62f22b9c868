use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

pub struct MembershipRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MembershipRepository<'a, C> {
    /// Creates a new instance of [`MembershipRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the user's active membership in a VA
    pub async fn find(
        &self,
        user_id: i32,
        va_id: i32,
    ) -> Result<Option<entity::va_membership::Model>, DbErr> {
        entity::prelude::VaMembership::find()
            .filter(entity::va_membership::Column::UserId.eq(user_id))
            .filter(entity::va_membership::Column::VaId.eq(va_id))
            .filter(entity::va_membership::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        user_id: i32,
        va_id: i32,
        role: &str,
        callsign: &str,
    ) -> Result<entity::va_membership::Model, DbErr> {
        let membership = entity::va_membership::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            va_id: ActiveValue::Set(va_id),
            role: ActiveValue::Set(role.to_string()),
            callsign: ActiveValue::Set(callsign.to_string()),
            provider_pilot_id: ActiveValue::Set(None),
            is_active: ActiveValue::Set(true),
            joined_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        membership.insert(self.db).await
    }

    /// Links the membership to the pilot's record in the VA's data provider
    pub async fn set_provider_pilot_id(
        &self,
        membership: entity::va_membership::Model,
        provider_pilot_id: String,
    ) -> Result<entity::va_membership::Model, DbErr> {
        let mut membership_am = membership.into_active_model();
        membership_am.provider_pilot_id = ActiveValue::Set(Some(provider_pilot_id));

        membership_am.update(self.db).await
    }
}
