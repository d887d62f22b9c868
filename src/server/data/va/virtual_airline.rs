use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
};

pub struct VirtualAirlineRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VirtualAirlineRepository<'a, C> {
    /// Creates a new instance of [`VirtualAirlineRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(
        &self,
        va_id: i32,
    ) -> Result<Option<entity::virtual_airline::Model>, DbErr> {
        entity::prelude::VirtualAirline::find_by_id(va_id)
            .one(self.db)
            .await
    }

    /// Replaces the VA's flight modes configuration.
    ///
    /// Returns `None` if the VA does not exist. The payload must already be validated.
    pub async fn update_flight_modes_config(
        &self,
        va_id: i32,
        flight_modes_config: serde_json::Value,
    ) -> Result<Option<entity::virtual_airline::Model>, DbErr> {
        let va = match self.get_by_id(va_id).await? {
            Some(va) => va,
            None => return Ok(None),
        };

        let mut va_am = va.into_active_model();
        va_am.flight_modes_config = ActiveValue::Set(Some(flight_modes_config));
        va_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let va = va_am.update(self.db).await?;

        Ok(Some(va))
    }
}
