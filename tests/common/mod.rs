#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use url_registry::prelude::*;

pub const BASE_URL: &str = "http://localhost:3000";

/// Builds a registry backed by a fresh in-memory repository, returning both
/// so tests can seed records directly through the repository.
pub fn make_registry(
    max_active: usize,
) -> (RegistryService<MemoryLinkRepository>, Arc<MemoryLinkRepository>) {
    let repository = Arc::new(MemoryLinkRepository::new(max_active));
    let registry = RegistryService::new(repository.clone(), BASE_URL, max_active);
    (registry, repository)
}

pub fn request(url: &str) -> ShortenRequest {
    ShortenRequest::new(url, 30)
}

pub async fn create_link(
    registry: &RegistryService<MemoryLinkRepository>,
    url: &str,
) -> ShortLink {
    registry.create(request(url)).await.unwrap()
}

/// Seeds a record whose expiry already passed. It starts out active; the
/// next registry operation's lazy-expiry pass flips it.
pub async fn seed_expired_link(repo: &MemoryLinkRepository, code: &str) -> ShortLink {
    use url_registry::domain::repositories::LinkRepository;

    let created_at = Utc::now() - Duration::minutes(5);
    repo.insert(NewShortLink {
        original_url: "https://example.com/old".to_string(),
        short_code: code.to_string(),
        short_url: format!("{BASE_URL}/{code}"),
        validity_minutes: 1,
        created_at,
        expires_at: created_at + Duration::minutes(1),
    })
    .await
    .unwrap()
}
