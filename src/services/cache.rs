use crate::database::{cache, Database};
use crate::models::CacheSettings;
use crate::utils::hash_string;

/// TTL cache for completion output, stored next to the entity tables.
/// Failures degrade to a miss; they never fail the caller.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    db: Database,
    ttl_secs: i64,
}

impl ResponseCache {
    pub fn new(db: Database, settings: &CacheSettings) -> Option<Self> {
        if !settings.enabled || settings.ttl_secs <= 0 {
            return None;
        }
        Some(Self {
            db,
            ttl_secs: settings.ttl_secs,
        })
    }

    pub fn key(prefix: &str, prompt: &str) -> String {
        format!("{}:{:016x}", prefix, hash_string(prompt))
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let db = self.db.clone();
        let key = key.to_string();
        let result = tokio::task::spawn_blocking(move || {
            let conn = db.connect()?;
            cache::get_cached(&conn, &key, chrono::Utc::now().timestamp())
        })
        .await;

        match result {
            Ok(Ok(hit)) => hit,
            Ok(Err(e)) => {
                log::warn!("Cache read failed: {}", e);
                None
            }
            Err(e) => {
                log::warn!("Cache read task failed: {}", e);
                None
            }
        }
    }

    pub async fn put(&self, key: &str, payload: &str) {
        let db = self.db.clone();
        let key = key.to_string();
        let payload = payload.to_string();
        let ttl = self.ttl_secs;
        let result = tokio::task::spawn_blocking(move || {
            let conn = db.connect()?;
            cache::put_cached(&conn, &key, &payload, chrono::Utc::now().timestamp(), ttl)
        })
        .await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("Cache write failed: {}", e),
            Err(e) => log::warn!("Cache write task failed: {}", e),
        }
    }

    pub async fn purge_expired(&self) -> usize {
        let db = self.db.clone();
        let result = tokio::task::spawn_blocking(move || {
            let conn = db.connect()?;
            cache::purge_expired(&conn, chrono::Utc::now().timestamp())
        })
        .await;

        match result {
            Ok(Ok(removed)) => removed,
            Ok(Err(e)) => {
                log::warn!("Cache purge failed: {}", e);
                0
            }
            Err(e) => {
                log::warn!("Cache purge task failed: {}", e);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_scoped_by_use_case() {
        let a = ResponseCache::key("journal", "same prompt");
        let b = ResponseCache::key("goal", "same prompt");
        assert_ne!(a, b);
        assert!(a.starts_with("journal:"));
        assert_eq!(a, ResponseCache::key("journal", "same prompt"));
    }

    #[test]
    fn disabled_or_zero_ttl_yields_no_cache() {
        let db = Database::new("unused.db");
        let disabled = CacheSettings {
            enabled: false,
            ttl_secs: 3600,
        };
        assert!(ResponseCache::new(db.clone(), &disabled).is_none());

        let zero_ttl = CacheSettings {
            enabled: true,
            ttl_secs: 0,
        };
        assert!(ResponseCache::new(db, &zero_ttl).is_none());
    }
}
