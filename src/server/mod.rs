//! Server application core modules.
//!
//! This module contains all server-side functionality: the PIREP submission pipeline and
//! its collaborators (cache, data provider, Live API client, flight mode validation), the
//! sea-orm repositories, background logbook worker and the thin axum HTTP layer.

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod live;
pub mod model;
pub mod provider;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
pub mod worker;
