//! Crewdesk: virtual airline backend for Infinite Flight communities.
//!
//! The [`server`] module holds the PIREP submission pipeline, the data provider
//! abstraction and its Airtable implementation, live flight resolution and the
//! thin HTTP layer on top. [`model`] holds the DTOs exchanged over HTTP.

pub mod model;
pub mod server;
