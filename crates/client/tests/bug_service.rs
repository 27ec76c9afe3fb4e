//! `BugService` against the real router.

mod common;

use assert_matches::assert_matches;

use bugtrack_client::api::ApiClient;
use bugtrack_client::error::ClientError;
use bugtrack_client::filters::BugFilters;
use bugtrack_client::models::BugDraft;
use bugtrack_client::services::BugService;

fn draft(title: &str) -> BugDraft {
    BugDraft::new(title, "A description long enough to pass", "Jane Doe")
}

#[tokio::test]
async fn health_reports_running_server() {
    let (base_url, _) = common::spawn_api().await;
    let service = BugService::new(ApiClient::new(&base_url));

    let health = service.health().await.unwrap();
    assert!(health.success);
    assert_eq!(health.message, "Server is running");
    assert_eq!(health.store_healthy, Some(true));
}

#[tokio::test]
async fn create_get_update_delete() {
    let (base_url, store) = common::spawn_api().await;
    let service = BugService::new(ApiClient::new(&base_url));

    let created = service.create_bug(&draft("Login button broken")).await.unwrap();
    assert_eq!(created.title, "Login button broken");
    assert_eq!(created.status, "open");

    let fetched = service.get_bug(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let mut change = BugDraft::from(&fetched);
    change.status = "resolved".into();
    let updated = service.update_bug(created.id, &change).await.unwrap();
    assert_eq!(updated.status, "resolved");
    assert_eq!(updated.title, "Login button broken");

    let message = service.delete_bug(created.id).await.unwrap();
    assert_eq!(message, "Bug deleted successfully");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn list_sends_filters_and_returns_everything() {
    let (base_url, _) = common::spawn_api().await;
    let service = BugService::new(ApiClient::new(&base_url));

    service.create_bug(&draft("First bug")).await.unwrap();
    service.create_bug(&draft("Second bug")).await.unwrap();

    let filters = BugFilters {
        status: Some("resolved".into()),
        ..Default::default()
    };
    let bugs = service.get_bugs(&filters).await.unwrap();
    assert_eq!(bugs.len(), 2);
    assert_eq!(bugs[0].title, "Second bug");
}

#[tokio::test]
async fn validation_errors_come_back_per_field() {
    let (base_url, _) = common::spawn_api().await;
    let service = BugService::new(ApiClient::new(&base_url));

    let mut bad = draft("AB");
    bad.priority = "urgent".into();

    let err = service.create_bug(&bad).await.unwrap_err();
    assert_matches!(&err, ClientError::Api { status: 400, message, .. } if message == "Validation failed");
    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["title", "priority"]);
}

#[tokio::test]
async fn unknown_bug_is_a_404_with_server_message() {
    let (base_url, _) = common::spawn_api().await;
    let service = BugService::new(ApiClient::new(&base_url));

    let err = service.get_bug(999_999).await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 404, message, .. } if message == "Bug not found");
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let service = BugService::new(ApiClient::new(&common::dead_base_url().await));
    assert_matches!(service.get_bugs(&BugFilters::default()).await, Err(ClientError::Request(_)));
}
