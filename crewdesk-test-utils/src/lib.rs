//! Test harness for Crewdesk.
//!
//! Tests are set up in two phases: [`TestBuilder`] declares tables and mock endpoints, and
//! `build()` returns a [`TestContext`] holding an in-memory SQLite database and a mockito
//! server that stands in for both the Live API and Airtable. Fixture helpers hang off the
//! context (`test.va()`, `test.user()`, `test.live()`, `test.airtable()`).

pub mod builder;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod redis;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{fixtures::factory, TestBuilder, TestContext, TestError};
}
