use super::Table;
use crate::models::Todo;
use rusqlite::{params, Connection, OptionalExtension, Row};

const TODO_SELECT_SQL: &str = "SELECT id, title, description, priority, due_date, completed, created_at, updated_at
     FROM todos";

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: row.get(3)?,
        due_date: row.get(4)?,
        completed: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Table for Todo {
    fn insert(&self, conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(
            "INSERT INTO todos (id, title, description, priority, due_date, completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                self.id,
                self.title,
                self.description,
                self.priority,
                self.due_date,
                self.completed,
                self.created_at,
                self.updated_at,
            ],
        )?;
        Ok(())
    }

    fn find(conn: &Connection, id: &str) -> rusqlite::Result<Option<Self>> {
        conn.query_row(
            &format!("{TODO_SELECT_SQL} WHERE id = ?1"),
            [id],
            row_to_todo,
        )
        .optional()
    }

    fn page(conn: &Connection, skip: u32, limit: u32) -> rusqlite::Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!(
            "{TODO_SELECT_SQL} ORDER BY rowid LIMIT ?1 OFFSET ?2"
        ))?;
        let todos = stmt
            .query_map(params![limit, skip], row_to_todo)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    fn save(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE todos
             SET title = ?1, description = ?2, priority = ?3, due_date = ?4,
                 completed = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                self.title,
                self.description,
                self.priority,
                self.due_date,
                self.completed,
                self.updated_at,
                self.id,
            ],
        )
    }

    fn remove(conn: &Connection, id: &str) -> rusqlite::Result<usize> {
        conn.execute("DELETE FROM todos WHERE id = ?1", [id])
    }
}
