use super::Table;
use crate::models::Goal;
use rusqlite::{params, Connection, OptionalExtension, Row};

const GOAL_SELECT_SQL: &str = "SELECT id, title, description, target_date, progress, status, created_at, updated_at
     FROM goals";

fn row_to_goal(row: &Row<'_>) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        target_date: row.get(3)?,
        progress: row.get(4)?,
        status: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Table for Goal {
    fn insert(&self, conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(
            "INSERT INTO goals (id, title, description, target_date, progress, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                self.id,
                self.title,
                self.description,
                self.target_date,
                self.progress,
                self.status,
                self.created_at,
                self.updated_at,
            ],
        )?;
        Ok(())
    }

    fn find(conn: &Connection, id: &str) -> rusqlite::Result<Option<Self>> {
        conn.query_row(
            &format!("{GOAL_SELECT_SQL} WHERE id = ?1"),
            [id],
            row_to_goal,
        )
        .optional()
    }

    fn page(conn: &Connection, skip: u32, limit: u32) -> rusqlite::Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!(
            "{GOAL_SELECT_SQL} ORDER BY rowid LIMIT ?1 OFFSET ?2"
        ))?;
        let goals = stmt
            .query_map(params![limit, skip], row_to_goal)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    fn save(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE goals
             SET title = ?1, description = ?2, target_date = ?3, progress = ?4,
                 status = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                self.title,
                self.description,
                self.target_date,
                self.progress,
                self.status,
                self.updated_at,
                self.id,
            ],
        )
    }

    fn remove(conn: &Connection, id: &str) -> rusqlite::Result<usize> {
        conn.execute("DELETE FROM goals WHERE id = ?1", [id])
    }
}
