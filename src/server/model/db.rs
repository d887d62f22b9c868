//! Database model type aliases.
//!
//! Short names for the sea-orm entity models used throughout the server, so services and
//! repositories do not need to import from the `entity` crate directly.

/// Registered Discord user, optionally linked to an Infinite Flight account.
pub type UserModel = entity::user::Model;

/// Virtual airline (tenant), including its callsign pattern and flight modes JSON.
pub type VirtualAirlineModel = entity::virtual_airline::Model;

/// A user's membership in a VA: role, per-VA callsign and provider pilot record link.
pub type MembershipModel = entity::va_membership::Model;

/// Route known to a VA, pointing at its provider record.
pub type RouteModel = entity::route::Model;

/// Livery ID to aircraft/airline name mapping.
pub type LiveryMappingModel = entity::livery_mapping::Model;

/// One version of a VA's data provider configuration.
pub type ProviderConfigModel = entity::data_provider_config::Model;
