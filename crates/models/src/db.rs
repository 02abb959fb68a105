use configs::DatabaseConfig;
use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use tracing::info;

use crate::errors::ModelError;

/// Collection holding animal documents.
pub const ANIMALS_COLLECTION: &str = "animals";

/// Build a client from the configured URI and select the configured database.
///
/// The driver connects lazily; use [`ping`] to verify reachability.
pub async fn connect(cfg: &DatabaseConfig) -> Result<Database, ModelError> {
    let mut opts = ClientOptions::parse(&cfg.uri)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    opts.app_name = Some(cfg.app_name.clone());
    opts.connect_timeout = Some(cfg.connect_timeout());
    let client = Client::with_options(opts).map_err(|e| ModelError::Db(e.to_string()))?;
    info!(database = %cfg.name, "mongodb client created");
    Ok(client.database(&cfg.name))
}

pub async fn ping(db: &Database) -> Result<(), ModelError> {
    db.run_command(doc! { "ping": 1 }, None)
        .await
        .map(|_| ())
        .map_err(|e| ModelError::Db(e.to_string()))
}
