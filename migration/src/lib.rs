pub use sea_orm_migration::prelude::*;

mod m20260301_000001_user;
mod m20260301_000002_virtual_airline;
mod m20260301_000003_va_membership;
mod m20260301_000004_route;
mod m20260301_000005_livery_mapping;
mod m20260301_000006_data_provider_config;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_user::Migration),
            Box::new(m20260301_000002_virtual_airline::Migration),
            Box::new(m20260301_000003_va_membership::Migration),
            Box::new(m20260301_000004_route::Migration),
            Box::new(m20260301_000005_livery_mapping::Migration),
            Box::new(m20260301_000006_data_provider_config::Migration),
        ]
    }
}
