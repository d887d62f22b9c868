//! Per-VA repositories: the airline itself, its routes, livery mappings and provider
//! configuration versions.

pub mod livery_mapping;
pub mod provider_config;
pub mod route;
pub mod virtual_airline;
