use super::Table;
use crate::models::JournalEntry;
use rusqlite::{params, Connection, OptionalExtension, Row};

const JOURNAL_SELECT_SQL: &str = "SELECT id, content, mood, tags, created_at, updated_at
     FROM journal_entries";

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    let tags_blob: Option<Vec<u8>> = row.get(3)?;
    let tags: Vec<String> = tags_blob
        .and_then(|b| serde_json::from_slice(&b).ok())
        .unwrap_or_default();

    Ok(JournalEntry {
        id: row.get(0)?,
        content: row.get(1)?,
        mood: row.get(2)?,
        tags,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn tags_blob(tags: &[String]) -> rusqlite::Result<Vec<u8>> {
    serde_json::to_vec(tags).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

impl Table for JournalEntry {
    fn insert(&self, conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(
            "INSERT INTO journal_entries (id, content, mood, tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                self.id,
                self.content,
                self.mood,
                tags_blob(&self.tags)?,
                self.created_at,
                self.updated_at,
            ],
        )?;
        Ok(())
    }

    fn find(conn: &Connection, id: &str) -> rusqlite::Result<Option<Self>> {
        conn.query_row(
            &format!("{JOURNAL_SELECT_SQL} WHERE id = ?1"),
            [id],
            row_to_entry,
        )
        .optional()
    }

    fn page(conn: &Connection, skip: u32, limit: u32) -> rusqlite::Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!(
            "{JOURNAL_SELECT_SQL} ORDER BY rowid LIMIT ?1 OFFSET ?2"
        ))?;
        let entries = stmt
            .query_map(params![limit, skip], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn save(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE journal_entries
             SET content = ?1, mood = ?2, tags = ?3, updated_at = ?4
             WHERE id = ?5",
            params![
                self.content,
                self.mood,
                tags_blob(&self.tags)?,
                self.updated_at,
                self.id,
            ],
        )
    }

    fn remove(conn: &Connection, id: &str) -> rusqlite::Result<usize> {
        conn.execute("DELETE FROM journal_entries WHERE id = ?1", [id])
    }
}
