//! User and membership repositories.

pub mod membership;
pub mod user;
