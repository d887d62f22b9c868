//! Server application models and type definitions.
//!
//! This module contains data models for the server application: application state, database
//! model type aliases, the typed VA and flight mode configuration and logbook worker job definitions.
//! These models bridge the gap between database entities, HTTP handlers, and background workers.

pub mod app;
pub mod db;
pub mod flight_mode;
pub mod va;
pub mod worker;
