//! Utility functions and helpers for server operations.
//!
//! This module provides reusable helpers shared by services and controllers: live callsign
//! decomposition and matching, and flight time parsing/formatting used by PIREP submission.

pub mod callsign;
pub mod time;
