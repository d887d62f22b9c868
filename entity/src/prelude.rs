pub use super::data_provider_config::Entity as DataProviderConfig;
pub use super::livery_mapping::Entity as LiveryMapping;
pub use super::route::Entity as Route;
pub use super::user::Entity as User;
pub use super::va_membership::Entity as VaMembership;
pub use super::virtual_airline::Entity as VirtualAirline;
