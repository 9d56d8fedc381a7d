use rusqlite::{params, Connection, OptionalExtension};

pub fn get_cached(conn: &Connection, key: &str, now: i64) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT payload FROM ai_cache WHERE cache_key = ?1 AND expires_at > ?2",
        params![key, now],
        |row| row.get(0),
    )
    .optional()
}

pub fn put_cached(
    conn: &Connection,
    key: &str,
    payload: &str,
    now: i64,
    ttl_secs: i64,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO ai_cache (cache_key, payload, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(cache_key) DO UPDATE SET
            payload = excluded.payload,
            created_at = excluded.created_at,
            expires_at = excluded.expires_at",
        params![key, payload, now, now + ttl_secs],
    )?;
    Ok(())
}

pub fn purge_expired(conn: &Connection, now: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM ai_cache WHERE expires_at <= ?1", [now])
}
