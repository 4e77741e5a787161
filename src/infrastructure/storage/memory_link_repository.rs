//! In-memory implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::RegistryError;

/// In-memory repository backing the registry for the lifetime of the process.
///
/// Records are soft-deleted only, so the vector grows monotonically; that is
/// fine for a demo-scale registry capped at a handful of active links.
///
/// The write lock is the single mutual-exclusion section for every mutating
/// operation: `insert` re-validates the active quota and code uniqueness
/// while holding it, so concurrent creates cannot both slip past the
/// service's pre-checks.
pub struct MemoryLinkRepository {
    max_active: usize,
    links: RwLock<Vec<ShortLink>>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository with the given active-link quota.
    pub fn new(max_active: usize) -> Self {
        Self {
            max_active,
            links: RwLock::new(Vec::new()),
        }
    }

    /// The configured active-link quota.
    pub fn max_active(&self) -> usize {
        self.max_active
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, RegistryError> {
        let mut links = self.links.write().await;

        let active = links.iter().filter(|l| l.is_active).count();
        if active >= self.max_active {
            return Err(RegistryError::CapacityExceeded {
                active,
                limit: self.max_active,
            });
        }

        if links
            .iter()
            .any(|l| l.is_active && l.short_code == new_link.short_code)
        {
            return Err(RegistryError::CodeTaken {
                code: new_link.short_code,
            });
        }

        let link = ShortLink {
            id: Uuid::new_v4(),
            original_url: new_link.original_url,
            short_code: new_link.short_code,
            short_url: new_link.short_url,
            validity_minutes: new_link.validity_minutes,
            created_at: new_link.created_at,
            expires_at: new_link.expires_at,
            click_count: 0,
            is_active: true,
        };

        links.push(link.clone());
        tracing::debug!(code = %link.short_code, id = %link.id, "link inserted");

        Ok(link)
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<ShortLink>, RegistryError> {
        let links = self.links.read().await;

        Ok(links
            .iter()
            .find(|l| l.is_active && l.short_code == code)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortLink>, RegistryError> {
        let links = self.links.read().await;

        Ok(links.iter().find(|l| l.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>, RegistryError> {
        let links = self.links.read().await;

        let mut all: Vec<ShortLink> = links.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(all)
    }

    async fn active_count(&self) -> Result<usize, RegistryError> {
        let links = self.links.read().await;

        Ok(links.iter().filter(|l| l.is_active).count())
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<usize, RegistryError> {
        let mut links = self.links.write().await;

        let mut expired = 0;
        for link in links.iter_mut() {
            if link.is_active && link.is_expired_at(now) {
                link.is_active = false;
                expired += 1;
            }
        }

        if expired > 0 {
            tracing::debug!(count = expired, "expired overdue links");
        }

        Ok(expired)
    }

    async fn record_click(&self, code: &str) -> Result<Option<ShortLink>, RegistryError> {
        let mut links = self.links.write().await;

        Ok(links
            .iter_mut()
            .find(|l| l.is_active && l.short_code == code)
            .map(|link| {
                link.click_count += 1;
                link.clone()
            }))
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, RegistryError> {
        let mut links = self.links.write().await;

        match links.iter_mut().find(|l| l.id == id) {
            Some(link) => {
                link.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
