//! Test context returned by [`TestBuilder`](crate::TestBuilder).

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Placeholder Live API key accepted by the mock server
pub static TEST_LIVE_API_KEY: &str = "test-live-api-key";

/// A test environment: in-memory SQLite database plus one mockito server that serves both
/// the Live API and Airtable paths.
///
/// ```ignore
/// let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
///
/// let va = test.va().insert_va("900", Some(factory::flight_modes())).await?;
/// test.live().create_sessions_endpoint("session-1", "Expert", 1);
///
/// // ... exercise code pointed at test.server_url() ...
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    pub db: DatabaseConnection,

    pub(crate) server: ServerGuard,
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            server,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock server; use it for both Live API and Airtable clients
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Keeps a mock alive for the rest of the test and includes it in [`assert_mocks`](Self::assert_mocks)
    pub(crate) fn keep(&mut self, mock: Mock) {
        self.mocks.push(mock);
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
