use std::sync::Arc;

use configs::AppConfig;
use service::{AnimalService, MongoAnimalRepository};
use tracing::{info, warn};

use crate::routes::{self, AppState};

/// Connect to the document store, build the app and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect(&cfg.database).await?;
    match models::db::ping(&db).await {
        Ok(()) => info!(database = %cfg.database.name, "mongodb reachable"),
        Err(e) => warn!(error = %e, "mongodb not reachable yet; store requests will fail until it is"),
    }

    let repo = Arc::new(MongoAnimalRepository::new(db));
    let state = AppState::new(AnimalService::new(repo));
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting animal shelter server");
    axum::serve(listener, app).await?;
    Ok(())
}
