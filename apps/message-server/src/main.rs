//! Message board server binary.

use message_server::{config::Config, init_tracing, serve};
use message_store::{MemoryMessageStore, MongoMessageStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    init_tracing(&config.log_level);

    tracing::info!(
        database = %config.database_name,
        mongodb = config.mongodb_uri.is_some(),
        "Starting message board server"
    );

    match config.mongodb_uri.clone() {
        Some(uri) => {
            let store = MongoMessageStore::connect(&uri, &config.database_name).await?;
            let result = serve(config, store.clone()).await;
            store.shutdown().await;
            result
        }
        None => {
            tracing::warn!("MONGODB_URI is not set; using the in-memory store");
            serve(config, MemoryMessageStore::new()).await
        }
    }
}
