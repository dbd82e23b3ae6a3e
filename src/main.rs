use anyhow::Result;
use fitdoc::api::routes::create_routes;
use fitdoc::config::{run_migrations, AppConfig, CompletionConfig, DatabaseConfig};
use fitdoc::services::CompletionClient;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fitdoc=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let completion_config = CompletionConfig::from_env()?;

    let db = db_config.create_pool().await?;
    run_migrations(&db).await?;

    let completion = CompletionClient::new(completion_config)?;
    let app = create_routes(db, completion, &config);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!("Fitness tracker API listening on http://{}", config.server_address());
    info!("Health check available at http://{}/health", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
