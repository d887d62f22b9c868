use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    cache::{Cache, InMemoryCache, ValkeyCache},
    config::Config,
    error::Error,
    live::LiveApiClient,
    model::app::AppState,
    provider::{AirtableProvider, ProviderRegistry},
    worker::{handler::LogbookJobHandler, supervise, LogbookQueue, LogbookWorker},
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect the shared Valkey cache, or fall back to a per-process in-memory cache when no
/// Valkey URL is configured
pub async fn build_cache(config: &Config) -> Result<Arc<dyn Cache>, Error> {
    use fred::prelude::{ClientLike, Config as RedisConfig, Pool};

    let Some(valkey_url) = &config.valkey_url else {
        tracing::info!("VALKEY_URL not set, using in-memory cache");
        return Ok(Arc::new(InMemoryCache::new()));
    };

    let redis_config = RedisConfig::from_url(valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(Arc::new(ValkeyCache::new(pool)))
}

/// Build the Live API client
pub fn build_live_client(config: &Config) -> Result<LiveApiClient, Error> {
    let live = LiveApiClient::new(
        &config.live_api_url,
        &config.live_api_key,
        config.http_timeout(),
    )?;

    Ok(live)
}

/// Register every supported data provider
pub fn build_providers(config: &Config) -> Result<ProviderRegistry, Error> {
    let airtable = AirtableProvider::new(&config.airtable_api_url, config.http_timeout())?;

    Ok(ProviderRegistry::new().with(Arc::new(airtable)))
}

/// Start the logbook worker and return the queue feeding it
pub fn start_logbook_worker(
    config: &Config,
    cache: Arc<dyn Cache>,
    live: LiveApiClient,
) -> LogbookQueue {
    let (queue, rx) = LogbookQueue::new(config.logbook_queue_capacity);

    let worker = LogbookWorker::new(rx, LogbookJobHandler::new(cache, live)).start();
    tokio::spawn(supervise(worker));

    queue
}

/// Wire every collaborator into the shared handler state
pub async fn build_app_state(config: &Config) -> Result<AppState, Error> {
    let db = connect_to_database(config).await?;
    let cache = build_cache(config).await?;
    let live = build_live_client(config)?;
    let providers = build_providers(config)?;
    let logbook_queue = start_logbook_worker(config, cache.clone(), live.clone());

    Ok(AppState {
        db,
        cache,
        live,
        providers,
        logbook_queue,
        flight_plan_concurrency: config.flight_plan_concurrency,
    })
}
