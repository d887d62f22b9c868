//! Cache key builders and TTLs.
//!
//! Keys embed every component that distinguishes a result; flight history keys carry both
//! the user and the page so pages never overwrite each other.

use std::time::Duration;

/// Discord ID -> user record
pub const USER_LOOKUP_TTL: Duration = Duration::from_secs(15 * 60);
/// Paged Live API flight history
pub const FLIGHT_HISTORY_TTL: Duration = Duration::from_secs(5 * 60);
/// Live roster of a game session
pub const LIVE_FLIGHTS_TTL: Duration = Duration::from_secs(60);
/// Live API session list
pub const SESSIONS_TTL: Duration = Duration::from_secs(15 * 60);
/// Livery -> aircraft/airline names
pub const LIVERY_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// VA configuration (flight modes, callsign pattern)
pub const VA_CONFIG_TTL: Duration = Duration::from_secs(10 * 60);
/// Active data provider configuration
pub const PROVIDER_CONFIG_TTL: Duration = Duration::from_secs(10 * 60);

pub fn user_by_discord_id(discord_id: &str) -> String {
    format!("user:discord:{}", discord_id)
}

pub fn flight_history(ifc_user_id: &str, page: u32) -> String {
    format!("flights:history:{}:page:{}", ifc_user_id, page)
}

pub fn live_flights(session_id: &str) -> String {
    format!("flights:live:{}", session_id)
}

pub fn sessions() -> String {
    "live:sessions".to_string()
}

pub fn livery(va_id: i32, livery_id: &str) -> String {
    format!("livery:{}:{}", va_id, livery_id)
}

pub fn va_config(va_id: i32) -> String {
    format!("va:{}:config", va_id)
}

/// The VA's active provider configuration, whatever its provider type
pub fn provider_config(va_id: i32) -> String {
    format!("va:{}:provider", va_id)
}
