//! Data access layer repositories.
//!
//! This module contains all database repository implementations for the application.
//! Repositories provide an abstraction layer over database operations, organizing
//! data access by domain (users and their VA memberships, and per-VA data).

pub mod user;
pub mod va;
