use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    auth::{AuthError, TokenSigner},
    config::Config,
    database::RedisStore,
    store::{DocumentStore, MemoryStore, OfflineStore, Repository},
};

pub struct State {
    pub config: Config,
    pub repository: Repository,
    pub signer: TokenSigner,
}

impl State {
    pub async fn new(config: Config) -> Result<Arc<Self>, AuthError> {
        let store = init_store(&config).await;

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Result<Arc<Self>, AuthError> {
        let signer = TokenSigner::new(&config.jwt_secret)?;

        Ok(Arc::new(Self {
            config,
            repository: Repository::new(store),
            signer,
        }))
    }
}

pub async fn init_store(config: &Config) -> Arc<dyn DocumentStore> {
    match &config.redis_url {
        Some(redis_url) => match RedisStore::connect(redis_url).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("Redis unreachable, serving demo data only: {e}");
                Arc::new(OfflineStore::new(e.to_string()))
            }
        },
        None => {
            info!("REDIS_URL not set, using in-memory store");
            memory_store().await
        }
    }
}

async fn memory_store() -> Arc<dyn DocumentStore> {
    match MemoryStore::with_demo_clients().await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Could not preload demo clients: {e}");
            Arc::new(MemoryStore::new())
        }
    }
}
