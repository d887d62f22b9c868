use sea_orm::entity::prelude::*;

/// One version of a VA's data provider configuration
///
/// Versions are never deleted; saving a configuration inserts a new row with
/// `config_version + 1` and deactivates the previous active row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "data_provider_config")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub va_id: i32,
    pub provider_type: String,
    pub config_version: i32,
    pub is_active: bool,
    /// One of `pending`, `valid`, `invalid`
    pub validation_status: String,
    pub config_data: Json,
    pub features_enabled: Json,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
