use neurocrypt::database::{init_database, Table};
use neurocrypt::models::{
    Entity, Goal, GoalPatch, JournalEntry, JournalEntryPatch, NewGoal, NewJournalEntry, NewTodo,
    Todo, TodoPatch,
};
use neurocrypt::services::store::{EntityStore, MAX_LIST_LIMIT};
use neurocrypt::utils::time;
use neurocrypt::AppError;
use std::collections::HashSet;
use tempfile::TempDir;

fn open_store() -> (TempDir, EntityStore) {
    let dir = tempfile::tempdir().unwrap();
    let db = init_database(&dir.path().join("store.db")).unwrap();
    (dir, EntityStore::new(db))
}

#[tokio::test]
async fn create_assigns_fresh_ids_and_equal_stamps() {
    let (_dir, store) = open_store();

    let mut seen = HashSet::new();
    for n in 0..5 {
        let todo: Todo = store.create(NewTodo::titled(format!("todo {n}"))).await.unwrap();
        assert!(!todo.id.is_empty());
        assert_eq!(todo.created_at, todo.updated_at);
        assert!(seen.insert(todo.id.clone()));
    }
}

#[tokio::test]
async fn get_returns_what_was_created() {
    let (_dir, store) = open_store();
    let draft: NewTodo = serde_json::from_str(
        r#"{"title": "File taxes", "description": "before April", "priority": 5,
            "due_date": "2026-04-15T17:00:00Z", "completed": false}"#,
    )
    .unwrap();

    let created: Todo = store.create(draft).await.unwrap();
    let loaded = store.get::<Todo>(&created.id).await.unwrap().unwrap();
    assert_eq!(loaded, created);
    assert!(store.get::<Todo>("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn update_of_missing_id_writes_nothing() {
    let (_dir, store) = open_store();
    let existing: Todo = store.create(NewTodo::titled("keep me")).await.unwrap();

    let patch = TodoPatch {
        title: Some("ghost".to_string()),
        ..Default::default()
    };
    assert!(store.update::<Todo>("missing", patch).await.unwrap().is_none());

    let all = store.list::<Todo>(0, 100).await.unwrap();
    assert_eq!(all, vec![existing]);
}

#[tokio::test]
async fn partial_update_merges_and_advances_updated_at() {
    let (_dir, store) = open_store();
    let draft: NewGoal =
        serde_json::from_str(r#"{"title": "Read 20 books", "description": "fiction too"}"#)
            .unwrap();
    let goal: Goal = store.create(draft).await.unwrap();

    let patch: GoalPatch = serde_json::from_str(r#"{"progress": 0.25}"#).unwrap();
    let updated = store.update::<Goal>(&goal.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.progress, 0.25);
    assert_eq!(updated.title, goal.title);
    assert_eq!(updated.description, goal.description);
    assert_eq!(updated.status, "active");
    assert_eq!(updated.created_at, goal.created_at);
    assert!(updated.updated_at > goal.updated_at);

    // back-to-back updates still move forward
    let again = store
        .update::<Goal>(&goal.id, GoalPatch::default())
        .await
        .unwrap()
        .unwrap();
    assert!(again.updated_at > updated.updated_at);

    let stored = store.get::<Goal>(&goal.id).await.unwrap().unwrap();
    assert_eq!(stored, again);
}

#[tokio::test]
async fn invalid_update_is_rejected_and_not_written() {
    let (_dir, store) = open_store();
    let goal: Goal = store.create(NewGoal::titled("Save money")).await.unwrap();

    let patch = GoalPatch {
        progress: Some(-0.1),
        ..Default::default()
    };
    let err = store.update::<Goal>(&goal.id, patch).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored = store.get::<Goal>(&goal.id).await.unwrap().unwrap();
    assert_eq!(stored, goal);
}

#[tokio::test]
async fn invalid_create_is_rejected() {
    let (_dir, store) = open_store();
    let err = store
        .create::<JournalEntry>(NewJournalEntry::with_content(""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(store.list::<JournalEntry>(0, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_reports_existence() {
    let (_dir, store) = open_store();
    let entry: JournalEntry = store
        .create(NewJournalEntry::with_content("Slept well"))
        .await
        .unwrap();

    assert!(store.delete::<JournalEntry>(&entry.id).await.unwrap());
    assert!(store.get::<JournalEntry>(&entry.id).await.unwrap().is_none());
    assert!(!store.delete::<JournalEntry>(&entry.id).await.unwrap());
}

#[tokio::test]
async fn list_pages_in_insertion_order() {
    let (_dir, store) = open_store();
    let mut ids = Vec::new();
    for n in 0..6 {
        let todo: Todo = store.create(NewTodo::titled(format!("t{n}"))).await.unwrap();
        ids.push(todo.id);
    }

    let first: Vec<String> = store
        .list::<Todo>(0, 4)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(first, ids[..4].to_vec());

    let rest: Vec<String> = store
        .list::<Todo>(4, 100)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(rest, ids[4..].to_vec());

    assert!(store.list::<Todo>(10, 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn journal_tags_and_nullable_fields_round_trip() {
    let (_dir, store) = open_store();
    let draft: NewJournalEntry = serde_json::from_str(
        r#"{"content": "Team offsite", "mood": "energised", "tags": ["work", "people"]}"#,
    )
    .unwrap();
    let entry: JournalEntry = store.create(draft).await.unwrap();

    let patch: JournalEntryPatch = serde_json::from_str(r#"{"mood": null}"#).unwrap();
    let updated = store
        .update::<JournalEntry>(&entry.id, patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.mood, None);
    assert_eq!(updated.tags, vec!["work", "people"]);

    let stored = store.get::<JournalEntry>(&entry.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn list_limit_is_capped() {
    let dir = tempfile::tempdir().unwrap();
    let db = init_database(&dir.path().join("store.db")).unwrap();
    let store = EntityStore::new(db.clone());

    let mut conn = db.connect().unwrap();
    let tx = conn.transaction().unwrap();
    let stamp = time::now();
    for n in 0..MAX_LIST_LIMIT + 5 {
        Todo::from_draft(format!("bulk-{n}"), NewTodo::titled(format!("bulk {n}")), stamp)
            .insert(&tx)
            .unwrap();
    }
    tx.commit().unwrap();

    let page = store.list::<Todo>(0, u32::MAX).await.unwrap();
    assert_eq!(page.len(), MAX_LIST_LIMIT as usize);
    assert_eq!(page[0].id, "bulk-0");

    let tail = store.list::<Todo>(MAX_LIST_LIMIT, u32::MAX).await.unwrap();
    assert_eq!(tail.len(), 5);
}
