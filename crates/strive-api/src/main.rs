//! strive server binary

use std::sync::Arc;
use strive_api::config::Config;
use strive_api::{seed, start_server};
use strive_db::Store;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "strive.ron".to_string());
    let config = Config::load(&config_path)?;

    let store = match &config.db_path {
        Some(path) => Store::open(path)?,
        None => {
            tracing::info!("no db_path configured, using an in-memory store");
            Store::in_memory()?
        }
    };

    if config.seed_demo_data {
        seed::populate(&store)?;
    }

    // surface pre-existing data that breaks the one-team-per-user rule
    for (username, teams) in store.membership_violations()? {
        tracing::warn!(%username, ?teams, "user appears in more than one team");
    }

    start_server(Arc::new(store), &config.bind).await?;
    Ok(())
}
