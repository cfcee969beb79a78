use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campusmate::api::router;
use campusmate::community::{
    CommunityClient, CommunityConfig, CommunityHttpClient, NoopCommunityClient,
};
use campusmate::services::MaintenanceChecker;
use campusmate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "campusmate=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://campusmate.db".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let community: Arc<dyn CommunityClient> = match CommunityConfig::new_from_env() {
        Ok(config) => Arc::new(CommunityHttpClient::new(config)?),
        Err(e) => {
            warn!("community client disabled: {}", e);
            Arc::new(NoopCommunityClient)
        }
    };

    let probe_url = std::env::var("MAINTENANCE_PROBE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:3000/health".to_string());
    let maintenance = Arc::new(MaintenanceChecker::new(probe_url));

    let state = AppState {
        db: pool.clone(),
        community,
        maintenance,
    };

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
