//! Declarative test builder.
//!
//! All configuration is queued on the builder and applied in `build()`: tables first, then
//! mock endpoints.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            mock_builders: Vec::new(),
        }
    }

    /// Add an entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use crewdesk_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), crewdesk_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(User)
    ///     .with_table(VaMembership)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Add every Crewdesk table
    pub fn with_crewdesk_tables(self) -> Self {
        self.with_table(entity::prelude::User)
            .with_table(entity::prelude::VirtualAirline)
            .with_table(entity::prelude::VaMembership)
            .with_table(entity::prelude::Route)
            .with_table(entity::prelude::LiveryMapping)
            .with_table(entity::prelude::DataProviderConfig)
    }

    /// Add a custom mock endpoint with full control over the mockito server
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Creates the tables and mock endpoints and returns the ready context
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment
    /// - `Err(TestError::DbErr)` - Database connection or table creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        setup.with_tables(self.tables).await?;

        for builder in self.mock_builders {
            let mock = builder(&mut setup.server);
            setup.mocks.push(mock);
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
