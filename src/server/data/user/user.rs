use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_discord_id(
        &self,
        discord_id: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::DiscordId.eq(discord_id))
            .one(self.db)
            .await
    }

    /// Creates a new user
    pub async fn create(
        &self,
        discord_id: &str,
        ifc_username: Option<String>,
        ifc_user_id: Option<String>,
    ) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let user = entity::user::ActiveModel {
            discord_id: ActiveValue::Set(discord_id.to_string()),
            ifc_username: ActiveValue::Set(ifc_username),
            ifc_user_id: ActiveValue::Set(ifc_user_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    /// Links the user to an Infinite Flight account, replacing any previous link
    pub async fn update_ifc_identity(
        &self,
        user: entity::user::Model,
        ifc_username: String,
        ifc_user_id: String,
    ) -> Result<entity::user::Model, DbErr> {
        let mut user_am = user.into_active_model();
        user_am.ifc_username = ActiveValue::Set(Some(ifc_username));
        user_am.ifc_user_id = ActiveValue::Set(Some(ifc_user_id));
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        user_am.update(self.db).await
    }
}
