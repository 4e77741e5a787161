//! Integration tests for code resolution and removal.

mod common;

use common::{create_link, make_registry, seed_expired_link};
use url_registry::domain::repositories::LinkRepository;
use url_registry::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn resolve_increments_click_count_by_one() {
    let (registry, _) = make_registry(5);
    let link = create_link(&registry, "https://example.com").await;

    let hit = registry.resolve(&link.short_code).await.unwrap();

    assert_eq!(hit.click_count, 1);
    // Everything else is untouched.
    assert_eq!(hit.id, link.id);
    assert_eq!(hit.original_url, link.original_url);
    assert_eq!(hit.created_at, link.created_at);
    assert_eq!(hit.expires_at, link.expires_at);
    assert!(hit.is_active);
}

#[tokio::test]
async fn every_resolution_counts_as_a_visit() {
    let (registry, _) = make_registry(5);
    let link = create_link(&registry, "https://example.com").await;

    registry.resolve(&link.short_code).await.unwrap();
    registry.resolve(&link.short_code).await.unwrap();
    let hit = registry.resolve(&link.short_code).await.unwrap();

    assert_eq!(hit.click_count, 3);
}

#[tokio::test]
async fn resolve_unknown_code_fails_not_found() {
    let (registry, _) = make_registry(5);

    let err = registry.resolve("nope99").await.unwrap_err();

    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[tokio::test]
async fn resolve_expired_code_fails_and_mutates_nothing() {
    let (registry, repo) = make_registry(5);
    let expired = seed_expired_link(&repo, "gone11").await;

    let err = registry.resolve("gone11").await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));

    let record = repo.find_by_id(expired.id).await.unwrap().unwrap();
    assert_eq!(record.click_count, 0);
    assert!(!record.is_active);
}

#[tokio::test]
async fn resolve_deleted_code_fails_not_found() {
    let (registry, _) = make_registry(5);
    let link = create_link(&registry, "https://example.com").await;
    registry.remove(link.id).await.unwrap();

    let err = registry.resolve(&link.short_code).await.unwrap_err();

    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[tokio::test]
async fn remove_keeps_click_count_intact() {
    let (registry, repo) = make_registry(5);
    let link = create_link(&registry, "https://example.com").await;
    registry.resolve(&link.short_code).await.unwrap();

    registry.remove(link.id).await.unwrap();

    let record = repo.find_by_id(link.id).await.unwrap().unwrap();
    assert!(!record.is_active);
    assert_eq!(record.click_count, 1);
}

#[tokio::test]
async fn remove_unknown_id_fails_not_found() {
    let (registry, _) = make_registry(5);

    let err = registry.remove(Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[tokio::test]
async fn list_shows_expired_record_as_inactive() {
    let (registry, repo) = make_registry(5);
    let expired = seed_expired_link(&repo, "gone11").await;
    create_link(&registry, "https://example.com/live").await;

    let links = registry.list().await.unwrap();

    assert_eq!(links.len(), 2);
    let gone = links.iter().find(|l| l.id == expired.id).unwrap();
    assert!(!gone.is_active);
}

#[tokio::test]
async fn list_is_sorted_newest_first() {
    use chrono::{Duration, Utc};

    let (registry, repo) = make_registry(5);
    for (code, age_minutes) in [("old111", 20), ("mid111", 10), ("new111", 0)] {
        let created_at = Utc::now() - Duration::minutes(age_minutes);
        repo.insert(NewShortLink {
            original_url: format!("https://example.com/{code}"),
            short_code: code.to_string(),
            short_url: format!("{}/{code}", common::BASE_URL),
            validity_minutes: 60,
            created_at,
            expires_at: created_at + Duration::minutes(60),
        })
        .await
        .unwrap();
    }

    let links = registry.list().await.unwrap();

    let codes: Vec<&str> = links.iter().map(|l| l.short_code.as_str()).collect();
    assert_eq!(codes, vec!["new111", "mid111", "old111"]);
}
