use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct RouteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RouteRepository<'a, C> {
    /// Creates a new instance of [`RouteRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a VA route by exact name; surrounding whitespace in `name` is ignored
    pub async fn find_by_name(
        &self,
        va_id: i32,
        name: &str,
    ) -> Result<Option<entity::route::Model>, DbErr> {
        entity::prelude::Route::find()
            .filter(entity::route::Column::VaId.eq(va_id))
            .filter(entity::route::Column::Name.eq(name.trim()))
            .one(self.db)
            .await
    }
}
