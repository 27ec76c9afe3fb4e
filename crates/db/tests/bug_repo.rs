//! Integration tests for `BugRepo` against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL` set and `cargo test -- --ignored`.

use bugtrack_db::models::bug::{BugEnvironment, BugFields};
use bugtrack_db::repositories::BugRepo;
use sqlx::PgPool;

fn new_bug(title: &str) -> BugFields {
    BugFields {
        title: title.to_string(),
        description: "Repository level bug description".to_string(),
        status: "open".to_string(),
        priority: "high".to_string(),
        reporter: "Repo Tester".to_string(),
        assignee: None,
        steps_to_reproduce: Some(vec!["Step 1".to_string(), "Step 2".to_string()]),
        environment: Some(BugEnvironment {
            os: Some("Windows 10".to_string()),
            browser: Some("Chrome".to_string()),
            version: Some("115.0".to_string()),
        }),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find(pool: PgPool) {
    let created = BugRepo::create(&pool, &new_bug("Repo create")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.assignee, "");
    assert_eq!(created.steps_to_reproduce.len(), 2);

    let found = BugRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.title, "Repo create");
    assert_eq!(found.environment.unwrap().0.browser.as_deref(), Some("Chrome"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_orders_newest_first(pool: PgPool) {
    let a = BugRepo::create(&pool, &new_bug("Older")).await.unwrap();
    let b = BugRepo::create(&pool, &new_bug("Newer")).await.unwrap();

    sqlx::query("UPDATE bugs SET created_at = NOW() - INTERVAL '1 day' WHERE id = $1")
        .bind(b.id)
        .execute(&pool)
        .await
        .unwrap();

    let ids: Vec<i64> = BugRepo::list(&pool).await.unwrap().iter().map(|x| x.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_keeps_absent_optionals(pool: PgPool) {
    let created = BugRepo::create(&pool, &new_bug("Before")).await.unwrap();

    let mut changes = new_bug("After");
    changes.steps_to_reproduce = None;
    changes.environment = None;
    changes.assignee = Some("Developer".to_string());

    let updated = BugRepo::update(&pool, created.id, &changes)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "After");
    assert_eq!(updated.assignee, "Developer");
    assert_eq!(updated.steps_to_reproduce.len(), 2);
    assert!(updated.environment.is_some());
    assert!(updated.updated_at >= created.updated_at);

    assert!(BugRepo::update(&pool, 999_999, &changes).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete(pool: PgPool) {
    let created = BugRepo::create(&pool, &new_bug("Delete me")).await.unwrap();
    assert!(BugRepo::delete(&pool, created.id).await.unwrap());
    assert!(!BugRepo::delete(&pool, created.id).await.unwrap());
    assert!(BugRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_check_constraints_reject_unknown_status(pool: PgPool) {
    let mut bad = new_bug("Bad status");
    bad.status = "closed".to_string();
    let err = BugRepo::create(&pool, &bad).await.unwrap_err();
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.constraint(), Some("ck_bugs_status"));
}
