use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

/// Connectivity validation state of a stored provider configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Pending,
    Valid,
    Invalid,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

pub struct ProviderConfigRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProviderConfigRepository<'a, C> {
    /// Creates a new instance of [`ProviderConfigRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// The VA's active configuration, if one was saved
    pub async fn get_active(
        &self,
        va_id: i32,
    ) -> Result<Option<entity::data_provider_config::Model>, DbErr> {
        entity::prelude::DataProviderConfig::find()
            .filter(entity::data_provider_config::Column::VaId.eq(va_id))
            .filter(entity::data_provider_config::Column::IsActive.eq(true))
            .order_by_desc(entity::data_provider_config::Column::ConfigVersion)
            .one(self.db)
            .await
    }

    /// Highest stored version for the VA and provider type, 0 when none exists
    pub async fn latest_version(&self, va_id: i32, provider_type: &str) -> Result<i32, DbErr> {
        let latest = entity::prelude::DataProviderConfig::find()
            .filter(entity::data_provider_config::Column::VaId.eq(va_id))
            .filter(entity::data_provider_config::Column::ProviderType.eq(provider_type))
            .order_by_desc(entity::data_provider_config::Column::ConfigVersion)
            .one(self.db)
            .await?;

        Ok(latest.map(|config| config.config_version).unwrap_or(0))
    }

    /// Supersedes the VA's active configuration with a new pending version.
    ///
    /// Older versions are kept but deactivated. Run inside a transaction so the deactivation
    /// and insert are applied together.
    pub async fn insert_version(
        &self,
        va_id: i32,
        provider_type: &str,
        config_data: serde_json::Value,
        features_enabled: serde_json::Value,
        actor: Option<String>,
    ) -> Result<entity::data_provider_config::Model, DbErr> {
        let version = self.latest_version(va_id, provider_type).await? + 1;
        let now = Utc::now().naive_utc();

        entity::prelude::DataProviderConfig::update_many()
            .col_expr(
                entity::data_provider_config::Column::IsActive,
                Expr::value(false),
            )
            .col_expr(entity::data_provider_config::Column::UpdatedAt, Expr::value(now))
            .filter(entity::data_provider_config::Column::VaId.eq(va_id))
            .filter(entity::data_provider_config::Column::IsActive.eq(true))
            .exec(self.db)
            .await?;

        let config = entity::data_provider_config::ActiveModel {
            va_id: ActiveValue::Set(va_id),
            provider_type: ActiveValue::Set(provider_type.to_string()),
            config_version: ActiveValue::Set(version),
            is_active: ActiveValue::Set(true),
            validation_status: ActiveValue::Set(ValidationStatus::Pending.as_str().to_string()),
            config_data: ActiveValue::Set(config_data),
            features_enabled: ActiveValue::Set(features_enabled),
            created_by: ActiveValue::Set(actor.clone()),
            updated_by: ActiveValue::Set(actor),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        config.insert(self.db).await
    }

    pub async fn set_validation_status(
        &self,
        config: entity::data_provider_config::Model,
        status: ValidationStatus,
    ) -> Result<entity::data_provider_config::Model, DbErr> {
        let mut config_am = config.into_active_model();
        config_am.validation_status = ActiveValue::Set(status.as_str().to_string());
        config_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        config_am.update(self.db).await
    }
}
