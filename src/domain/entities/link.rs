//! Shortened-link entity and its creation input.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A shortened URL record held by the registry.
///
/// Records are soft-deleted only: deletion and expiry flip [`is_active`]
/// to `false`, but the record stays in the backing collection so that
/// statistics keep counting its clicks.
///
/// [`is_active`]: ShortLink::is_active
#[derive(Debug, Clone, Serialize)]
pub struct ShortLink {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    /// Requested lifetime in minutes (1..=1440).
    pub validity_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: u64,
    pub is_active: bool,
}

impl ShortLink {
    /// Returns true if the link's expiry timestamp has passed at `now`.
    ///
    /// Expiry is evaluated lazily at read time; nothing flips `is_active`
    /// until a registry operation runs an expiry pass.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Input data for inserting a new link.
///
/// The service computes the derived fields (`short_url`, timestamps); the
/// repository assigns the id and the initial `click_count`/`is_active`.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub validity_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_link(expires_at: DateTime<Utc>) -> ShortLink {
        let now = Utc::now();
        ShortLink {
            id: Uuid::new_v4(),
            original_url: "https://example.com".to_string(),
            short_code: "abc123".to_string(),
            short_url: "http://localhost:3000/abc123".to_string(),
            validity_minutes: 30,
            created_at: now,
            expires_at,
            click_count: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_not_expired_before_deadline() {
        let link = make_link(Utc::now() + Duration::minutes(30));
        assert!(!link.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_expired_after_deadline() {
        let link = make_link(Utc::now() - Duration::seconds(1));
        assert!(link.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_expired_exactly_at_deadline() {
        let now = Utc::now();
        let link = make_link(now);
        assert!(link.is_expired_at(now));
    }
}
