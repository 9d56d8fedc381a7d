use crate::database::{Database, Table};
use crate::errors::AppResult;
use crate::models::Entity;
use crate::utils::{generate_id, time};
use rusqlite::Connection;

pub const DEFAULT_LIST_LIMIT: u32 = 100;
pub const MAX_LIST_LIMIT: u32 = 1000;

/// Durable CRUD for every entity kind. Each call runs on the blocking pool with
/// its own connection, so no transaction outlives a single operation.
#[derive(Debug, Clone)]
pub struct EntityStore {
    db: Database,
}

impl EntityStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn run<T, F>(&self, op: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> AppResult<T> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = db.connect()?;
            op(&mut conn)
        })
        .await?
    }

    pub async fn create<E: Entity + Table>(&self, draft: E::Draft) -> AppResult<E> {
        let entity = E::from_draft(generate_id(), draft, time::now());
        entity.validate()?;
        self.run(move |conn| {
            entity.insert(conn)?;
            log::debug!("Created {} {}", E::KIND, entity.id());
            Ok(entity)
        })
        .await
    }

    pub async fn list<E: Entity + Table>(&self, skip: u32, limit: u32) -> AppResult<Vec<E>> {
        let limit = limit.min(MAX_LIST_LIMIT);
        self.run(move |conn| Ok(E::page(conn, skip, limit)?)).await
    }

    pub async fn get<E: Entity + Table>(&self, id: &str) -> AppResult<Option<E>> {
        let id = id.to_string();
        self.run(move |conn| Ok(E::find(conn, &id)?)).await
    }

    pub async fn update<E: Entity + Table>(
        &self,
        id: &str,
        patch: E::Patch,
    ) -> AppResult<Option<E>> {
        let id = id.to_string();
        self.run(move |conn| {
            let tx = conn.transaction()?;
            let Some(mut entity) = E::find(&tx, &id)? else {
                return Ok(None);
            };
            entity.apply(patch);
            entity.validate()?;
            entity.touch(time::next_stamp(entity.updated_at()));
            entity.save(&tx)?;
            tx.commit()?;
            log::debug!("Updated {} {}", E::KIND, id);
            Ok(Some(entity))
        })
        .await
    }

    pub async fn delete<E: Entity + Table>(&self, id: &str) -> AppResult<bool> {
        let id = id.to_string();
        self.run(move |conn| {
            let removed = E::remove(conn, &id)? > 0;
            if removed {
                log::debug!("Deleted {} {}", E::KIND, id);
            }
            Ok(removed)
        })
        .await
    }
}
