use std::sync::Arc;

use sqlx::SqlitePool;

use crate::community::CommunityClient;
use crate::services::MaintenanceChecker;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub community: Arc<dyn CommunityClient>,
    pub maintenance: Arc<MaintenanceChecker>,
}
