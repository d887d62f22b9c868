pub mod prelude;

pub mod data_provider_config;
pub mod livery_mapping;
pub mod route;
pub mod user;
pub mod va_membership;
pub mod virtual_airline;
