use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use phonebook::http::{self, AppState};
use phonebook::{Config, ContactStore, InMemoryContactStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::load()?;

    info!("Initializing store...");
    let store = open_store(&config).await?;

    let app = http::app(AppState::new(store.clone()), &config);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    let served = http::serve(listener, app).await;
    store.close().await;
    served.context("server error")
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn ContactStore>> {
    match &config.database_url {
        Some(uri) => connect_database(uri).await,
        None => Ok(Arc::new(InMemoryContactStore::new())),
    }
}

#[cfg(feature = "mongo")]
async fn connect_database(uri: &str) -> anyhow::Result<Arc<dyn ContactStore>> {
    let store = phonebook::MongoContactStore::connect(uri, None)
        .await
        .context("failed to connect to MongoDB")?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mongo"))]
async fn connect_database(_uri: &str) -> anyhow::Result<Arc<dyn ContactStore>> {
    tracing::warn!("Built without the mongo feature, ignoring MONGODB_URI");
    Ok(Arc::new(InMemoryContactStore::new()))
}
