use sea_orm::entity::prelude::*;

/// Maps an opaque Live API livery ID to readable aircraft and airline names
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "livery_mapping")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub va_id: i32,
    pub livery_id: String,
    pub aircraft_id: Option<String>,
    pub aircraft_name: String,
    pub airline_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
