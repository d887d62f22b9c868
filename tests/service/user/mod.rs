//! Tests for UserService registration and flight history lookups.

mod flight_history;
mod register;

use super::*;
