use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct LiveryMappingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LiveryMappingRepository<'a, C> {
    /// Creates a new instance of [`LiveryMappingRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_livery(
        &self,
        va_id: i32,
        livery_id: &str,
    ) -> Result<Option<entity::livery_mapping::Model>, DbErr> {
        entity::prelude::LiveryMapping::find()
            .filter(entity::livery_mapping::Column::VaId.eq(va_id))
            .filter(entity::livery_mapping::Column::LiveryId.eq(livery_id))
            .one(self.db)
            .await
    }
}
