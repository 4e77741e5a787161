//! Repository trait for short-link storage.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::RegistryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Storage interface for shortened links.
///
/// The registry service talks to storage only through this trait, so the
/// in-memory backend can be swapped for a persistent one without touching
/// the operation logic.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::MemoryLinkRepository`] - in-memory backend
/// - Test mocks available with `cfg(test)`
///
/// # Invariant enforcement
///
/// `insert` is the commit point for the two registry invariants (active-link
/// quota, active-code uniqueness). Implementations must re-check both inside
/// a single mutual-exclusion section: concurrent creates could otherwise all
/// pass the service's pre-checks before any of them commits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link, assigning its id and marking it active.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CapacityExceeded`] if the active quota is
    /// full, or [`RegistryError::CodeTaken`] if the code is already held by
    /// an active record.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, RegistryError>;

    /// Finds the active record holding `code`, if any.
    ///
    /// Inactive records never match; their codes are free for reuse.
    async fn find_active_by_code(&self, code: &str) -> Result<Option<ShortLink>, RegistryError>;

    /// Finds a record by id, active or not.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortLink>, RegistryError>;

    /// Returns all records (active and inactive), newest first.
    async fn list_all(&self) -> Result<Vec<ShortLink>, RegistryError>;

    /// Number of records currently marked active.
    async fn active_count(&self) -> Result<usize, RegistryError>;

    /// Flips `is_active` to false for every active record whose expiry has
    /// passed at `now`. Returns how many records were flipped.
    async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<usize, RegistryError>;

    /// Atomically increments the click count of the active record holding
    /// `code` and returns the updated record.
    ///
    /// Returns `Ok(None)` without mutating anything when no active record
    /// matches.
    async fn record_click(&self, code: &str) -> Result<Option<ShortLink>, RegistryError>;

    /// Marks the record with `id` inactive, leaving all other fields intact.
    ///
    /// Returns `Ok(false)` when no record has that id.
    async fn deactivate(&self, id: Uuid) -> Result<bool, RegistryError>;
}
