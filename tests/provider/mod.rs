//! Tests for the Airtable data provider against the mock server.

mod airtable;

use std::time::Duration;

use crewdesk::server::provider::{
    schema::{EntitySchema, EntityType},
    AirtableProvider, ProviderConfigData,
};
use crewdesk_test_utils::{prelude::*, TestContext};

const BASE_ID: &str = "appTest";

fn provider(test: &TestContext) -> AirtableProvider {
    AirtableProvider::new(&test.server_url(), Duration::from_secs(5)).unwrap()
}

fn config() -> ProviderConfigData {
    ProviderConfigData::parse(factory::airtable_config(BASE_ID)).unwrap()
}

fn schema(config: &ProviderConfigData, entity_type: EntityType) -> EntitySchema {
    config.schema(entity_type).cloned().unwrap()
}
