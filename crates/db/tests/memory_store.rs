//! Behaviour of the in-memory store that the API tests rely on.

use bugtrack_core::types::Timestamp;
use bugtrack_db::models::bug::{Bug, BugEnvironment, BugFields};
use bugtrack_db::store::{BugStore, InMemoryBugStore};
use chrono::{Duration, Utc};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fields(title: &str) -> BugFields {
    BugFields {
        title: title.to_string(),
        description: "Something went wrong in a reproducible way".to_string(),
        status: "open".to_string(),
        priority: "medium".to_string(),
        reporter: "Test User".to_string(),
        assignee: None,
        steps_to_reproduce: None,
        environment: None,
    }
}

fn seeded(id: i64, created_at: Timestamp) -> Bug {
    Bug {
        id,
        title: format!("Seeded {id}"),
        description: "Seeded bug description".to_string(),
        status: "open".to_string(),
        priority: "low".to_string(),
        reporter: "Seeder".to_string(),
        assignee: String::new(),
        steps_to_reproduce: Vec::new(),
        environment: None,
        created_at,
        updated_at: created_at,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_assigns_increasing_ids_and_defaults() {
    let store = InMemoryBugStore::new();

    let first = store.create(&fields("First bug")).await.unwrap();
    let second = store.create(&fields("Second bug")).await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.assignee, "");
    assert!(first.steps_to_reproduce.is_empty());
    assert!(first.environment.is_none());
    assert_eq!(first.created_at, first.updated_at);
}

#[tokio::test]
async fn list_is_newest_first_regardless_of_insertion_order() {
    let store = InMemoryBugStore::new();
    let now = Utc::now();

    store.seed(seeded(1, now - Duration::hours(1))).await;
    store.seed(seeded(2, now - Duration::hours(3))).await;
    store.seed(seeded(3, now)).await;
    store.seed(seeded(4, now - Duration::hours(2))).await;

    let ids: Vec<i64> = store.list().await.unwrap().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![3, 1, 4, 2]);
}

#[tokio::test]
async fn update_keeps_absent_optional_fields() {
    let store = InMemoryBugStore::new();
    let mut input = fields("Original title");
    input.assignee = Some("Dev".to_string());
    input.steps_to_reproduce = Some(vec!["Step 1".to_string()]);
    input.environment = Some(BugEnvironment {
        os: Some("Linux".to_string()),
        ..Default::default()
    });
    let created = store.create(&input).await.unwrap();

    let mut changes = fields("Updated title");
    changes.status = "in-progress".to_string();
    let updated = store.update(created.id, &changes).await.unwrap().unwrap();

    assert_eq!(updated.title, "Updated title");
    assert_eq!(updated.status, "in-progress");
    assert_eq!(updated.assignee, "Dev");
    assert_eq!(updated.steps_to_reproduce, vec!["Step 1".to_string()]);
    assert_eq!(
        updated.environment.unwrap().0.os.as_deref(),
        Some("Linux")
    );
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_unknown_id_returns_none() {
    let store = InMemoryBugStore::new();
    assert!(store.update(999_999, &fields("Nobody home")).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_then_find_returns_none_and_ids_are_not_reused() {
    let store = InMemoryBugStore::new();
    let bug = store.create(&fields("Delete me")).await.unwrap();

    assert!(store.delete(bug.id).await.unwrap());
    assert!(store.find_by_id(bug.id).await.unwrap().is_none());
    assert!(!store.delete(bug.id).await.unwrap());
    assert!(store.is_empty().await);

    let next = store.create(&fields("After delete")).await.unwrap();
    assert!(next.id > bug.id);
}

#[tokio::test]
async fn seeding_moves_the_id_counter_forward() {
    let store = InMemoryBugStore::new();
    store.seed(seeded(41, Utc::now())).await;

    let created = store.create(&fields("Next one")).await.unwrap();
    assert_eq!(created.id, 42);
    assert_eq!(store.len().await, 2);
}
