pub mod assistant;
pub mod cache;
pub mod completion;
pub mod prompts;
pub mod store;

use crate::database;
use crate::models::Settings;
use crate::utils::config::database_path;
use anyhow::Context;
use assistant::Assistant;
use cache::ResponseCache;
use completion::CompletionClient;
use std::sync::Arc;
use store::EntityStore;

/// Services shared by every request handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: EntityStore,
    pub assistant: Arc<Assistant>,
    pub cache: Option<ResponseCache>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub async fn initialize(settings: Settings) -> anyhow::Result<Self> {
        let db_path = database_path(&settings.database.url);
        let db = {
            let path = db_path.clone();
            tokio::task::spawn_blocking(move || database::init_database(&path))
                .await?
                .with_context(|| format!("failed to initialize database at {}", db_path.display()))?
        };
        log::info!("Database ready at {}", db.path().display());

        let cache = ResponseCache::new(db.clone(), &settings.cache);
        if let Some(cache) = &cache {
            let purged = cache.purge_expired().await;
            log::info!(
                "AI response cache enabled (ttl {}s, {} expired entries purged)",
                settings.cache.ttl_secs,
                purged
            );
        }

        let client = CompletionClient::new(&settings.ai).context("failed to build HTTP client")?;
        if settings.ai.api_key.trim().is_empty() {
            log::warn!("No AI API key configured; AI endpoints will return placeholders");
        } else {
            log::info!("AI completions via {} ({})", settings.ai.base_url, client.model());
        }

        Ok(Self {
            store: EntityStore::new(db),
            assistant: Arc::new(Assistant::new(client, cache.clone())),
            cache,
            settings: Arc::new(settings),
        })
    }

    pub async fn shutdown(&self) {
        if let Some(cache) = &self.cache {
            let purged = cache.purge_expired().await;
            log::info!("Purged {} expired cache entries", purged);
        }
    }
}
