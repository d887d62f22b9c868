use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub discord_id: String,
    pub ifc_username: Option<String>,
    pub ifc_user_id: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<entity::user::Model> for UserDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            discord_id: user.discord_id,
            ifc_username: user.ifc_username,
            ifc_user_id: user.ifc_user_id,
            created_at: user.created_at,
        }
    }
}

/// Request body for linking a Discord user to an Infinite Flight Community account
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterUserDto {
    pub ifc_username: String,
}
