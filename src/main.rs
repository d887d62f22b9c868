use crewdesk::server::{config::Config, router, startup};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(config).await {
        tracing::error!("Server exited with error: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: Config) -> Result<(), crewdesk::server::error::Error> {
    let state = startup::build_app_state(&config).await?;
    let app = router::routes().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            crewdesk::server::error::Error::InternalError(format!(
                "Failed to bind {}: {}",
                config.listen_addr, e
            ))
        })?;

    tracing::info!("Starting server on {}", config.listen_addr);

    axum::serve(listener, app).await.map_err(|e| {
        crewdesk::server::error::Error::InternalError(format!("Server error: {}", e))
    })
}
