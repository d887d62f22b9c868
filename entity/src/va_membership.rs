use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "va_membership")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub va_id: i32,
    pub role: String,
    /// Callsign number assigned within the VA, without prefix or suffix
    pub callsign: String,
    /// Record ID of this pilot in the VA's data provider, set once synced
    pub provider_pilot_id: Option<String>,
    pub is_active: bool,
    pub joined_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
