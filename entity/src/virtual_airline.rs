use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "virtual_airline")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub discord_server_id: String,
    pub callsign_prefix: Option<String>,
    pub callsign_suffix: Option<String>,
    /// Live API session (server) name or ID the VA flies on, e.g. "Expert"
    pub game_server: Option<String>,
    pub flight_modes_config: Option<Json>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
